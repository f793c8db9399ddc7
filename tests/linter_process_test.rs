#![cfg(unix)]

mod common;

use std::path::Path;

use apilint_lib::{ApiLinter, Diagnostic, LintError, Position, Range, Severity};
use common::{Fixture, ONE_PROBLEM_REPORT, fail_with, path_str, print_and_exit};
use pretty_assertions::assert_eq;

fn linter_for(fixture: &Fixture, script: &Path) -> ApiLinter {
    let linter = ApiLinter::new(&fixture.root);
    linter.set_command(vec![path_str(script).to_string()]).unwrap();
    linter
}

#[test]
fn test_lint_through_a_real_process() {
    let fixture = Fixture::new();
    fixture.write("a.proto", "syntax = \"proto3\";\n");
    let script = fixture.fake_linter(&print_and_exit(ONE_PROBLEM_REPORT, 0));
    let linter = linter_for(&fixture, &script);

    assert!(linter.is_installed());
    let diagnostics = linter.lint(Path::new("a.proto")).unwrap();

    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::warning(
                Range::new(Position::new(2, 0), Position::new(2, 9)),
                "Request messages should be named after the RPC."
            )
            .with_rule(
                "core::0131::request-message-name",
                "https://linter.aip.dev/131/request-message-name"
            )
        ]
    );
}

#[test]
fn test_lint_failure_through_a_real_process() {
    let fixture = Fixture::new();
    let script = fixture.fake_linter(&fail_with("Error: exit status 1: a.proto:12:5:bad thing: nested", 1));
    let linter = linter_for(&fixture, &script);

    let diagnostics = linter.lint(Path::new("a.proto")).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message, "bad thing: nested");
    assert_eq!(diagnostics[0].range, Range::point(Position::new(11, 4)));
}

#[test]
fn test_lint_with_missing_executable_is_an_execution_error() {
    let fixture = Fixture::new();
    let linter = ApiLinter::new(&fixture.root);
    linter
        .set_command(vec![path_str(&fixture.tool_dir.join("no-such-linter")).to_string()])
        .unwrap();

    assert!(!linter.is_installed());
    assert!(matches!(linter.ensure_installed(), Err(LintError::ToolNotInstalled { .. })));
    assert!(matches!(linter.lint(Path::new("a.proto")), Err(LintError::Execution(_))));
}

#[test]
fn test_command_change_reprobes() {
    let fixture = Fixture::new();
    let linter = ApiLinter::new(&fixture.root);
    linter
        .set_command(vec![path_str(&fixture.tool_dir.join("api-linter")).to_string()])
        .unwrap();
    assert!(!linter.is_installed());

    // Installing the tool later is not noticed until the command changes
    let script = fixture.fake_linter("exit 0");
    assert!(!linter.is_installed());

    linter.set_command(vec!["sh".to_string(), path_str(&script).to_string()]).unwrap();
    assert!(linter.is_installed());
}

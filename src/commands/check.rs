//! Handler for the `check` command.

use colored::*;
use std::error::Error as _;
use std::io::IsTerminal;

use apilint_lib::exit_codes::exit;
use apilint_lib::output::OutputFormat;
use apilint_lib::{Diagnostic, LintError};

use crate::CheckArgs;
use crate::cli_utils::{build_linter, load_settings_with_cli_error_handling, workspace_relative};

/// Lint every file, print the results, and exit with the matching code.
pub fn handle_check(args: CheckArgs) {
    let loaded = load_settings_with_cli_error_handling(&args.settings);
    let linter = build_linter(&loaded);

    if let Err(e) = linter.ensure_installed() {
        eprintln!("{}: {}", "Error".red().bold(), e);
        exit::tool_error();
    }

    let mut results: Vec<(String, Vec<Diagnostic>)> = Vec::with_capacity(args.files.len());
    let mut had_errors = false;

    for file in &args.files {
        let display_path = file.display().to_string();
        let target = workspace_relative(file, &loaded.workspace_root);
        log::debug!("Linting {display_path} as {}", target.display());

        match linter.lint(&target) {
            Ok(diagnostics) => results.push((display_path, diagnostics)),
            Err(e) => {
                had_errors = true;
                report_lint_error(&display_path, &e);
            }
        }
    }

    let total_diagnostics: usize = results.iter().map(|(_, diagnostics)| diagnostics.len()).sum();

    if !args.quiet {
        print_results(&results, args.output_format);
    }

    if had_errors {
        exit::tool_error();
    }
    if total_diagnostics > 0 {
        exit::diagnostics_found();
    }
    exit::success();
}

fn report_lint_error(file: &str, error: &LintError) {
    eprintln!("{}: {}: {}", "Error".red().bold(), file, error);
    let mut source = error.source();
    while let Some(cause) = source {
        log::debug!("  caused by: {cause}");
        source = cause.source();
    }
}

fn print_results(results: &[(String, Vec<Diagnostic>)], output_format: OutputFormat) {
    let formatter = output_format.create_formatter(std::io::stdout().is_terminal());

    let output = formatter.format_results(results);
    if !output.is_empty() || output_format == OutputFormat::Json {
        println!("{output}");
    }

    let total_diagnostics = results.iter().map(|(_, diagnostics)| diagnostics.len()).sum();
    if let Some(summary) = formatter.format_summary(results.len(), total_diagnostics) {
        println!("{summary}");
    }
}

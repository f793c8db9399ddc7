//! Concise output formatter for easy parsing by editors

use crate::diagnostic::Diagnostic;
use crate::output::OutputFormatter;

/// Concise formatter: file:line:col: severity [RULE] message
#[derive(Default)]
pub struct ConciseFormatter;

impl ConciseFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for ConciseFormatter {
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| {
                let (line, column) = diagnostic.range.start.one_based();
                let rule = diagnostic.rule_id.as_deref().unwrap_or("api-linter");
                format!(
                    "{file_path}:{line}:{column}: {} [{rule}] {}",
                    diagnostic.severity, diagnostic.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Position, Range};

    #[test]
    fn test_concise_format() {
        let diagnostics = vec![
            Diagnostic::warning(Range::point(Position::new(2, 0)), "Use lower_snake_case.")
                .with_rule("core::0140::lower-snake", "https://linter.aip.dev/140/lower-snake"),
            Diagnostic::error(Range::point(Position::origin()), "syntax error"),
        ];
        let output = ConciseFormatter::new().format_diagnostics(&diagnostics, "a.proto");
        assert_eq!(
            output,
            "a.proto:3:1: warning [core::0140::lower-snake] Use lower_snake_case.\n\
             a.proto:1:1: error [api-linter] syntax error"
        );
    }

    #[test]
    fn test_concise_empty() {
        assert_eq!(ConciseFormatter::new().format_diagnostics(&[], "a.proto"), "");
    }
}

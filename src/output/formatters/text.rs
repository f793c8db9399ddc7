//! Default text output formatter with colors

use crate::diagnostic::{Diagnostic, Severity};
use crate::output::OutputFormatter;
use colored::*;

/// Default human-readable formatter with colors
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn paint(&self, text: String, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors { style(&text).to_string() } else { text }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        let mut output = String::new();

        for diagnostic in diagnostics {
            let (line, column) = diagnostic.range.start.one_based();
            let severity = match diagnostic.severity {
                Severity::Error => self.paint("error".to_string(), |s| s.red().bold()),
                Severity::Warning => self.paint("warning".to_string(), |s| s.yellow().bold()),
            };

            // Format: file:line:column: severity[rule] message
            output.push_str(&format!(
                "{}:{}:{}: {}{} {}\n",
                self.paint(file_path.to_string(), |s| s.blue().underline()),
                self.paint(line.to_string(), |s| s.cyan()),
                self.paint(column.to_string(), |s| s.cyan()),
                severity,
                diagnostic
                    .rule_id
                    .as_ref()
                    .map(|rule| self.paint(format!("[{rule}]"), |s| s.yellow()))
                    .unwrap_or_default(),
                diagnostic.message,
            ));

            if let Some(uri) = &diagnostic.rule_doc_uri {
                output.push_str(&format!("  {} {}\n", self.paint("-->".to_string(), |s| s.dimmed()), uri));
            }
        }

        // Remove trailing newline
        if output.ends_with('\n') {
            output.pop();
        }

        output
    }

    fn format_summary(&self, files_linted: usize, total_diagnostics: usize) -> Option<String> {
        let file_text = if files_linted == 1 { "file" } else { "files" };
        if total_diagnostics == 0 {
            let message = format!("Success: No issues found in {files_linted} {file_text}");
            return Some(self.paint(message, |s| s.green()));
        }
        let issue_text = if total_diagnostics == 1 { "issue" } else { "issues" };
        Some(format!(
            "\n{}",
            self.paint(
                format!("Found {total_diagnostics} {issue_text} in {files_linted} {file_text}"),
                |s| s.red().bold()
            )
        ))
    }
}

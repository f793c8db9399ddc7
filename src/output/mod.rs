//! Output formatting module for apilint
//!
//! This module renders diagnostics for the terminal or for other tools.
//! Positions are printed one-based, the way editors and compilers report them.

use crate::diagnostic::Diagnostic;

pub mod formatters;

// Re-export formatters
pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the diagnostics of a single file
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String;

    /// Format the results of a whole run, one `(file, diagnostics)` entry per linted file
    fn format_results(&self, results: &[(String, Vec<Diagnostic>)]) -> String {
        results
            .iter()
            .filter(|(_, diagnostics)| !diagnostics.is_empty())
            .map(|(file_path, diagnostics)| self.format_diagnostics(diagnostics, file_path))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a summary of results across multiple files
    fn format_summary(&self, _files_linted: usize, _total_diagnostics: usize) -> Option<String> {
        // Default: no summary
        None
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Default human-readable format with colors
    #[default]
    Text,
    /// Concise format: file:line:col: severity [RULE] message
    Concise,
    /// JSON array covering every linted file
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "full" => Ok(OutputFormat::Text),
            "concise" => Ok(OutputFormat::Concise),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl OutputFormat {
    /// Create a formatter instance for this format
    pub fn create_formatter(&self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text if use_colors => Box::new(TextFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::without_colors()),
            OutputFormat::Concise => Box::new(ConciseFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("FULL".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("concise".parse::<OutputFormat>(), Ok(OutputFormat::Concise));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_results_skips_clean_files() {
        use crate::diagnostic::{Position, Range};

        let results = vec![
            ("a.proto".to_string(), Vec::new()),
            (
                "b.proto".to_string(),
                vec![Diagnostic::error(Range::point(Position::new(1, 0)), "boom")],
            ),
        ];
        let output = OutputFormat::Concise.create_formatter(false).format_results(&results);
        assert_eq!(output, "b.proto:2:1: error [api-linter] boom");
    }

    #[test]
    fn test_json_format_results_is_one_array() {
        use crate::diagnostic::{Position, Range};

        let results = vec![
            (
                "a.proto".to_string(),
                vec![Diagnostic::warning(Range::point(Position::origin()), "first")],
            ),
            ("b.proto".to_string(), Vec::new()),
            (
                "c.proto".to_string(),
                vec![Diagnostic::error(Range::point(Position::new(4, 2)), "second")],
            ),
        ];
        let formatter = OutputFormat::Json.create_formatter(false);
        let output = formatter.format_results(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["file"], "a.proto");
        assert_eq!(entries[1]["file"], "c.proto");
        assert_eq!(entries[1]["line"], 5);
        assert!(formatter.format_summary(3, 2).is_none());
    }
}

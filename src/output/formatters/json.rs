//! JSON output formatter

use crate::diagnostic::Diagnostic;
use crate::output::OutputFormatter;
use serde_json::{Value, json};

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn diagnostic_to_json(diagnostic: &Diagnostic, file_path: &str) -> Value {
    let (line, column) = diagnostic.range.start.one_based();
    let (end_line, end_column) = diagnostic.range.end.one_based();
    json!({
        "file": file_path,
        "line": line,
        "column": column,
        "end_line": end_line,
        "end_column": end_column,
        "severity": diagnostic.severity.as_str(),
        "rule": diagnostic.rule_id,
        "rule_doc_uri": diagnostic.rule_doc_uri,
        "message": diagnostic.message,
    })
}

impl OutputFormatter for JsonFormatter {
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        let values: Vec<Value> = diagnostics
            .iter()
            .map(|diagnostic| diagnostic_to_json(diagnostic, file_path))
            .collect();
        serde_json::to_string_pretty(&values).unwrap_or_default()
    }

    fn format_results(&self, results: &[(String, Vec<Diagnostic>)]) -> String {
        format_all_diagnostics_as_json(results)
    }
}

/// Helper to format all diagnostics from multiple files as a single JSON document
pub fn format_all_diagnostics_as_json(all_diagnostics: &[(String, Vec<Diagnostic>)]) -> String {
    let values: Vec<Value> = all_diagnostics
        .iter()
        .flat_map(|(file_path, diagnostics)| {
            diagnostics
                .iter()
                .map(move |diagnostic| diagnostic_to_json(diagnostic, file_path))
        })
        .collect();
    serde_json::to_string_pretty(&values).unwrap_or_default()
}

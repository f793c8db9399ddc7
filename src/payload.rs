//! Structured output written by `api-linter --output-format json`.
//!
//! The payload is a JSON array with one entry per linted file. Positions are one-based.
//! Fields the tool may add later (for example `suggestion`) are ignored.

use serde::Deserialize;

/// Results for one linted file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileReport {
    pub file_path: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Problem {
    pub message: String,
    #[serde(default)]
    pub rule_id: String,
    #[serde(default)]
    pub rule_doc_uri: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub start_position: SourcePosition,
    pub end_position: SourcePosition,
}

/// One-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SourcePosition {
    pub line_number: u32,
    pub column_number: u32,
}

/// Parse the whole stdout of a successful run.
pub fn parse(stdout: &str) -> Result<Vec<FileReport>, serde_json::Error> {
    serde_json::from_str(stdout)
}

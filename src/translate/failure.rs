//! Parsing of the error stream written when the linter fails.
//!
//! The stream starts with a fixed three-token preamble, followed by one record per line:
//!
//! ```text
//! <file>:<line>:<column>:<description>
//! ```
//!
//! Line and column are one-based. The description may itself contain colons.

use thiserror::Error;

use crate::diagnostic::{Diagnostic, Position, Range};

/// Number of leading whitespace-separated tokens discarded before the first record.
pub const PREAMBLE_TOKENS: usize = 3;

/// One parsed line of the error stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord<'a> {
    pub file: &'a str,
    pub line_number: u32,
    pub column_number: u32,
    pub description: &'a str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Drop the preamble from the first line. Returns `None` when the stream is blank.
///
/// Tokens are only taken from the first line: if it holds fewer than [`PREAMBLE_TOKENS`], the
/// whole first line is consumed and the records on later lines are left intact.
pub fn strip_preamble(stderr: &str) -> Option<&str> {
    if stderr.trim().is_empty() {
        return None;
    }

    let first_line = stderr.split('\n').next().unwrap_or_default();
    let mut rest = first_line;
    for _ in 0..PREAMBLE_TOKENS {
        rest = rest.trim_start();
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[token_end..];
    }

    let consumed = first_line.len() - rest.len();
    Some(stderr[consumed..].trim_start_matches([' ', '\t']))
}

/// Non-blank lines of the record section.
pub fn record_lines(records: &str) -> impl Iterator<Item = &str> {
    records.lines().filter(|line| !line.trim().is_empty())
}

/// Split one record into its fields. Everything after the third colon is the description.
pub fn parse_record(line: &str) -> Result<ErrorRecord<'_>, RecordError> {
    let mut fields = line.splitn(4, ':');
    let file = fields.next().ok_or(RecordError::MissingField("file"))?;
    let line_number = parse_number("line", fields.next())?;
    let column_number = parse_number("column", fields.next())?;
    let description = fields.next().unwrap_or_default();

    Ok(ErrorRecord {
        file,
        line_number,
        column_number,
        description,
    })
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<u32, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    value.trim().parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl ErrorRecord<'_> {
    /// An error at the record's position when it names `target_file`, else at the document origin.
    pub fn to_diagnostic(&self, target_file: &str) -> Diagnostic {
        let position = if self.file == target_file {
            Position::from_one_based(self.line_number, self.column_number)
        } else {
            Position::origin()
        };
        Diagnostic::error(Range::point(position), self.description)
    }
}

/// Every parseable record of `stderr` as an error diagnostic. Unparseable lines are dropped.
pub fn translate_failure(stderr: &str, target_file: &str) -> Vec<Diagnostic> {
    let Some(records) = strip_preamble(stderr) else {
        log::debug!("Linter error stream has no records: {stderr:?}");
        return Vec::new();
    };

    record_lines(records)
        .filter_map(|line| match parse_record(line) {
            Ok(record) => Some(record.to_diagnostic(target_file)),
            Err(e) => {
                log::warn!("Skipping linter error line {line:?}: {e}");
                None
            }
        })
        .collect()
}

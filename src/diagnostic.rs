//! Diagnostic model shared by the translator, the CLI formatters and the language server.
//!
//! Positions are zero-based, matching the Language Server Protocol. The external tool reports
//! one-based positions; conversion happens once, in [`Position::from_one_based`].

use serde::Serialize;

/// A zero-based line/character position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// The document origin, used for problems that cannot be attributed to a position.
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Convert a one-based tool position. Zero values saturate at the origin.
    pub fn from_one_based(line_number: u32, column_number: u32) -> Self {
        Self::new(line_number.saturating_sub(1), column_number.saturating_sub(1))
    }

    /// One-based `(line, column)` pair for human-readable output.
    pub fn one_based(&self) -> (u32, u32) {
        (self.line.saturating_add(1), self.character.saturating_add(1))
    }
}

/// A half-open range between two positions.
///
/// `start <= end` is expected but not enforced; malformed ranges reported by the tool pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `position`.
    pub const fn point(position: Position) -> Self {
        Self::new(position, position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem reported for the linted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
    /// Identifier of the rule that produced this diagnostic, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Link to the rule's documentation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_doc_uri: Option<String>,
}

impl Diagnostic {
    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Error,
            rule_id: None,
            rule_doc_uri: None,
        }
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Warning,
            rule_id: None,
            rule_doc_uri: None,
        }
    }

    /// Attach a rule reference. Empty strings are treated as absent.
    pub fn with_rule(mut self, rule_id: impl Into<String>, rule_doc_uri: impl Into<String>) -> Self {
        let rule_id = rule_id.into();
        let rule_doc_uri = rule_doc_uri.into();
        self.rule_id = (!rule_id.is_empty()).then_some(rule_id);
        self.rule_doc_uri = (!rule_doc_uri.is_empty()).then_some(rule_doc_uri);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_one_based_subtracts_one() {
        assert_eq!(Position::from_one_based(3, 10), Position::new(2, 9));
        assert_eq!(Position::from_one_based(1, 1), Position::origin());
    }

    #[test]
    fn test_from_one_based_saturates_at_zero() {
        assert_eq!(Position::from_one_based(0, 0), Position::origin());
    }

    #[test]
    fn test_one_based_reverses_conversion() {
        let pos = Position::from_one_based(12, 5);
        assert_eq!(pos.one_based(), (12, 5));
    }

    #[test]
    fn test_with_rule_drops_empty_fields() {
        let diag = Diagnostic::warning(Range::default(), "m").with_rule("core::0131", "");
        assert_eq!(diag.rule_id.as_deref(), Some("core::0131"));
        assert_eq!(diag.rule_doc_uri, None);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}

//! Translation of the JSON report written on a clean exit.

use crate::diagnostic::{Diagnostic, Position, Range};
use crate::payload::{self, Location, Problem};

impl From<Location> for Range {
    fn from(location: Location) -> Self {
        Range::new(
            Position::from_one_based(location.start_position.line_number, location.start_position.column_number),
            Position::from_one_based(location.end_position.line_number, location.end_position.column_number),
        )
    }
}

impl From<Problem> for Diagnostic {
    fn from(problem: Problem) -> Self {
        Diagnostic::warning(problem.location.into(), problem.message).with_rule(problem.rule_id, problem.rule_doc_uri)
    }
}

/// One warning per problem, in report order.
///
/// Only a report with exactly one file entry is applicable; any other shape yields nothing.
pub fn translate_success(stdout: &str) -> Result<Vec<Diagnostic>, serde_json::Error> {
    let mut reports = payload::parse(stdout)?;
    if reports.len() != 1 {
        log::debug!("Expected one file in linter report, found {}", reports.len());
        return Ok(Vec::new());
    }

    let report = reports.remove(0);
    Ok(report.problems.into_iter().map(Diagnostic::from).collect())
}

//! Translation of a finished linter run into diagnostics.
//!
//! A zero exit status means the tool wrote its JSON report to stdout ([`success`]). Any other
//! status means it failed and described why on stderr ([`failure`]).

pub mod failure;
pub mod success;

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::executor::ProcessOutput;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// The tool exited cleanly but its output is not a valid report.
    #[error("Malformed linter output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Translate the raw result of one run.
///
/// `target_file` is the file path exactly as it was passed to the tool.
pub fn translate(
    exit_code: i32,
    stdout: &str,
    stderr: &str,
    target_file: &str,
) -> Result<Vec<Diagnostic>, TranslateError> {
    if exit_code != 0 {
        log::debug!("Linter exited with status {exit_code}; parsing error stream");
        return Ok(failure::translate_failure(stderr, target_file));
    }
    Ok(success::translate_success(stdout)?)
}

/// [`translate`] applied to a captured [`ProcessOutput`].
pub fn translate_output(output: &ProcessOutput, target_file: &str) -> Result<Vec<Diagnostic>, TranslateError> {
    translate(output.exit_code, &output.stdout, &output.stderr, target_file)
}

//! Run Google's `api-linter` on protobuf files and turn its output into diagnostics.
//!
//! A lint run has three steps:
//! - [`invocation`] picks the working directory and rewrites every path relative to it,
//! - [`executor`] runs the tool,
//! - [`translate`] maps the JSON report (clean exit) or the error stream (failure) to [`Diagnostic`]s.
//!
//! [`linter::ApiLinter`] ties them together and memoizes the availability [`probe`].

pub mod config;
pub mod diagnostic;
pub mod executor;
pub mod exit_codes;
pub mod invocation;
pub mod linter;
pub mod lsp;
pub mod output;
pub mod payload;
pub mod probe;
pub mod translate;

pub use crate::diagnostic::{Diagnostic, Position, Range, Severity};
pub use crate::executor::{ExecutorError, ProcessOutput, ProcessRunner, SystemRunner};
pub use crate::invocation::{Invocation, Resolution};
pub use crate::linter::{ApiLinter, LintError};
pub use crate::translate::{TranslateError, translate};

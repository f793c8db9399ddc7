//! Process execution for the external linter.
//!
//! [`ProcessRunner`] is the only I/O boundary of the library. [`SystemRunner`] spawns real
//! processes; tests substitute fakes that return canned output.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Result of running a process to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code. `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// Standard output, decoded as UTF-8 (lossy).
    pub stdout: String,
    /// Standard error, decoded as UTF-8 (lossy).
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("No command to execute")]
    EmptyCommand,
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs `argv[0]` with `argv[1..]` in `cwd` and blocks until it exits.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ProcessOutput, ExecutorError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ProcessOutput, ExecutorError> {
        (**self).run(argv, cwd)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for std::sync::Arc<R> {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ProcessOutput, ExecutorError> {
        (**self).run(argv, cwd)
    }
}

/// Runs processes with `std::process::Command`. No timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ProcessOutput, ExecutorError> {
        let (program, args) = argv.split_first().ok_or(ExecutorError::EmptyCommand)?;

        log::debug!("Running {:?} in {}", argv, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecutorError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command() {
        let result = SystemRunner.run(&[], Path::new("."));
        assert!(matches!(result, Err(ExecutorError::EmptyCommand)));
    }

    #[test]
    fn test_tool_not_found() {
        let argv = vec![OsString::from("nonexistent-tool-xyz123")];
        let result = SystemRunner.run(&argv, Path::new("."));
        assert!(matches!(result, Err(ExecutorError::Spawn { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_captures_exit_code_and_streams() {
        let argv: Vec<OsString> = ["sh", "-c", "echo out; echo err >&2; exit 3"]
            .iter()
            .map(OsString::from)
            .collect();
        let output = SystemRunner.run(&argv, Path::new(".")).expect("sh should run");
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert!(!output.success());
    }

    #[test]
    #[cfg(unix)]
    fn test_runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let argv: Vec<OsString> = ["pwd"].iter().map(OsString::from).collect();
        let output = SystemRunner.run(&argv, dir.path()).expect("pwd should run");
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}

//! Availability check for the external linter.
//!
//! `api-linter -h` always exits with status 2, whether or not it knows the flag. That status, and
//! only that status, means the tool is installed. Anything else (a clean exit, the shell's
//! "command not found" status, a crash, or a failure to spawn at all) means it is not.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::executor::ProcessRunner;

/// Flag appended to the configured command for the probe.
pub const PROBE_FLAG: &str = "-h";

/// Exit status of the probe that identifies an installed tool.
pub const INSTALLED_EXIT_CODE: i32 = 2;

/// Classify a probe exit status.
pub fn is_installed_exit_code(exit_code: i32) -> bool {
    exit_code == INSTALLED_EXIT_CODE
}

/// Single-slot cache of the probe result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstalledCache {
    value: bool,
    checked: bool,
}

impl InstalledCache {
    /// Cached answer, or `None` if the probe has not run since the last invalidation.
    pub fn get(&self) -> Option<bool> {
        self.checked.then_some(self.value)
    }

    pub fn store(&mut self, installed: bool) {
        self.value = installed;
        self.checked = true;
    }

    pub fn invalidate(&mut self) {
        self.checked = false;
    }
}

#[derive(Debug)]
struct ProbeState {
    command: Vec<String>,
    cache: InstalledCache,
}

/// Memoized installation check keyed on the configured command.
///
/// The lock is held while probing, so concurrent callers run at most one probe per command.
#[derive(Debug)]
pub struct AvailabilityProber {
    state: Mutex<ProbeState>,
}

impl AvailabilityProber {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            state: Mutex::new(ProbeState {
                command,
                cache: InstalledCache::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn command(&self) -> Vec<String> {
        self.lock().command.clone()
    }

    /// Replace the command. Returns `true` if it changed, in which case the cache is invalidated.
    pub fn set_command(&self, command: Vec<String>) -> bool {
        let mut state = self.lock();
        if state.command == command {
            return false;
        }
        log::debug!("Linter command changed from {:?} to {:?}", state.command, command);
        state.command = command;
        state.cache.invalidate();
        true
    }

    /// Whether the tool is installed, probing in `cwd` on the first call after a command change.
    pub fn is_installed<R: ProcessRunner + ?Sized>(&self, runner: &R, cwd: &Path) -> bool {
        let mut state = self.lock();
        if let Some(installed) = state.cache.get() {
            return installed;
        }

        let mut argv: Vec<OsString> = state.command.iter().map(OsString::from).collect();
        argv.push(PROBE_FLAG.into());

        let installed = match runner.run(&argv, cwd) {
            Ok(output) => {
                log::debug!("Probe {:?} exited with status {}", argv, output.exit_code);
                is_installed_exit_code(output.exit_code)
            }
            Err(e) => {
                log::debug!("Probe {:?} failed: {}", argv, e);
                false
            }
        };

        state.cache.store(installed);
        installed
    }
}

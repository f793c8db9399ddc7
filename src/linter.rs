//! The `api-linter` front end used by the CLI and the language server.
//!
//! [`ApiLinter`] holds the host-provided settings, owns the availability probe, and runs one
//! resolve/execute/translate cycle per [`ApiLinter::lint`] call. Setters take `&self` so a single
//! instance can be shared behind an `Arc` and linted from blocking worker threads.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::config::{Settings, find_config_file};
use crate::diagnostic::Diagnostic;
use crate::executor::{ExecutorError, ProcessRunner, SystemRunner};
use crate::invocation::{self, Invocation, Resolution};
use crate::probe::AvailabilityProber;
use crate::translate::{self, TranslateError};

/// Command used when the host configures none.
pub const DEFAULT_COMMAND: &str = "api-linter";

/// Where users are sent when the tool is missing.
pub const INSTALL_URL: &str = "https://linter.aip.dev/#installation";

#[derive(Debug, Error)]
pub enum LintError {
    #[error("`{command}` is not installed. Follow the instructions here: {url}", url = INSTALL_URL)]
    ToolNotInstalled { command: String },
    #[error("The linter command is empty")]
    EmptyCommand,
    #[error(transparent)]
    Execution(#[from] ExecutorError),
    #[error(transparent)]
    MalformedOutput(#[from] TranslateError),
}

pub fn default_command() -> Vec<String> {
    vec![DEFAULT_COMMAND.to_string()]
}

#[derive(Debug, Clone, Default)]
struct LintSettings {
    workspace_root: PathBuf,
    config_file: Option<PathBuf>,
    proto_paths: Vec<String>,
    directories: Option<Vec<String>>,
}

pub struct ApiLinter<R = SystemRunner> {
    runner: R,
    prober: AvailabilityProber,
    settings: RwLock<LintSettings>,
}

impl ApiLinter<SystemRunner> {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self::with_runner(SystemRunner, workspace_root)
    }
}

impl<R: ProcessRunner> ApiLinter<R> {
    pub fn with_runner(runner: R, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            prober: AvailabilityProber::new(default_command()),
            settings: RwLock::new(LintSettings {
                workspace_root: workspace_root.into(),
                ..LintSettings::default()
            }),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn read_settings(&self) -> LintSettings {
        self.settings.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn update_settings(&self, update: impl FnOnce(&mut LintSettings)) {
        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut settings);
    }

    pub fn command(&self) -> Vec<String> {
        self.prober.command()
    }

    /// Replace the command. An identical command keeps the cached installation state.
    ///
    /// Returns whether the command changed.
    pub fn set_command(&self, command: Vec<String>) -> Result<bool, LintError> {
        if command.is_empty() {
            return Err(LintError::EmptyCommand);
        }
        Ok(self.prober.set_command(command))
    }

    /// Linter config file, absolute or relative to the workspace root.
    pub fn set_config_file(&self, config_file: Option<PathBuf>) {
        self.update_settings(|settings| settings.config_file = config_file);
    }

    /// Include paths, relative to the workspace root.
    pub fn set_proto_paths(&self, proto_paths: Vec<String>) {
        self.update_settings(|settings| settings.proto_paths = proto_paths);
    }

    /// Lint scopes, most specific first. `None` lints every file from the workspace root.
    pub fn set_directories(&self, directories: Option<Vec<String>>) {
        self.update_settings(|settings| settings.directories = directories);
    }

    pub fn set_workspace_root(&self, workspace_root: impl Into<PathBuf>) {
        let workspace_root = workspace_root.into();
        self.update_settings(|settings| settings.workspace_root = workspace_root);
    }

    pub fn workspace_root(&self) -> PathBuf {
        self.read_settings().workspace_root
    }

    /// Apply a loaded settings file. The linter config file is located relative to the workspace root.
    ///
    /// Settings with an empty command are rejected as a whole; nothing changes.
    pub fn apply_settings(&self, settings: &Settings) -> Result<(), LintError> {
        if settings.command.is_empty() {
            return Err(LintError::EmptyCommand);
        }
        self.set_command(settings.command.clone())?;
        let workspace_root = self.workspace_root();
        let config_file = settings
            .config_file
            .as_deref()
            .and_then(|path| find_config_file(&workspace_root, path));
        if settings.config_file.is_some() && config_file.is_none() {
            log::warn!(
                "Linter config file {:?} not found; linting without it",
                settings.config_file.as_deref().unwrap_or_default()
            );
        }
        self.set_config_file(config_file);
        self.set_proto_paths(settings.proto_paths.clone());
        self.set_directories(settings.directories.clone());
        Ok(())
    }

    /// Whether the configured tool is installed. Probes once per command.
    pub fn is_installed(&self) -> bool {
        let workspace_root = self.workspace_root();
        self.prober.is_installed(&self.runner, &workspace_root)
    }

    pub fn ensure_installed(&self) -> Result<(), LintError> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(LintError::ToolNotInstalled {
                command: self.command().join(" "),
            })
        }
    }

    /// Resolve how `file` would be linted, without running anything.
    pub fn resolve(&self, file: &Path) -> Resolution {
        let settings = self.read_settings();
        invocation::resolve(
            file,
            &settings.workspace_root,
            settings.directories.as_deref(),
            settings.config_file.as_deref(),
            &settings.proto_paths,
        )
    }

    /// Lint one file, given relative to the workspace root or as an absolute path.
    ///
    /// Files outside every configured directory yield no diagnostics and spawn nothing.
    pub fn lint(&self, file: &Path) -> Result<Vec<Diagnostic>, LintError> {
        match self.resolve(file) {
            Resolution::Run(invocation) => self.run(&invocation),
            Resolution::Skip => Ok(Vec::new()),
        }
    }

    fn run(&self, invocation: &Invocation) -> Result<Vec<Diagnostic>, LintError> {
        let argv = invocation.command_line(&self.command());
        let output = self.runner.run(&argv, &invocation.cwd)?;
        let diagnostics = translate::translate_output(&output, &invocation.target_file())?;
        log::debug!(
            "{}: {} diagnostic(s) (exit status {})",
            invocation.target_file(),
            diagnostics.len(),
            output.exit_code
        );
        Ok(diagnostics)
    }
}

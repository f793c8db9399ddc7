//!
//! Host settings for running `api-linter`: which command to run, which linter config file to pass,
//! which include paths to add, and which directories scope linting.
//! Settings live in `.apilint.toml` (or `apilint.toml`) and can be overridden from the CLI or by
//! language server clients.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod loading;
pub use loading::*;


/// Settings file names, in order of precedence.
pub const SETTINGS_FILES: &[&str] = &[".apilint.toml", "apilint.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Command used to run the linter, e.g. `["api-linter"]` or `["go", "run", "github.com/googleapis/api-linter/cmd/api-linter"]`
    pub command: Vec<String>,

    /// Linter config file, absolute or relative to the workspace root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,

    /// Include paths passed with `-I`, relative to the workspace root
    pub proto_paths: Vec<String>,

    /// Directories to lint, most specific first. Files outside all of them are not linted.
    /// When absent, every file is linted from the workspace root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directories: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command: crate::linter::default_command(),
            config_file: None,
            proto_paths: Vec::new(),
            directories: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: std::io::Error, path: String },

    /// Failed to parse the settings file
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError { source: toml::de::Error, path: String },

    /// Failed to render settings as TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Locate the linter config file.
///
/// An absolute path is used if it exists; otherwise the path is joined onto the workspace root and
/// used if that exists. An empty path means no config file.
pub fn find_config_file(workspace_root: &Path, config_path: &str) -> Option<PathBuf> {
    if config_path.is_empty() {
        return None;
    }

    let path = Path::new(config_path);
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    let joined = workspace_root.join(path);
    if joined.exists() {
        return Some(joined);
    }

    log::debug!(
        "Linter config {} not found in {}",
        config_path,
        workspace_root.display()
    );
    None
}

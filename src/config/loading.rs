use std::path::{Path, PathBuf};

use super::{ConfigError, SETTINGS_FILES, Settings};

/// Prevent infinite traversal
const MAX_DEPTH: usize = 100;

/// Settings together with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// The settings file, if one was found.
    pub path: Option<PathBuf>,
    /// Root against which relative settings paths and lint targets are resolved.
    pub workspace_root: PathBuf,
}

/// Read and parse one settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        source,
        path: path.display().to_string(),
    })?;
    Settings::from_toml_str(&content).map_err(|source| ConfigError::ParseError {
        source,
        path: path.display().to_string(),
    })
}

/// Load settings from an explicit file, or discover one upward from `start_dir`.
///
/// The workspace root is the directory holding the settings file. Without a settings file it is
/// the nearest ancestor containing `.git`, or `start_dir` itself.
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> Result<LoadedSettings, ConfigError> {
    let start_dir = absolutize(start_dir);

    let path = match explicit {
        Some(path) => Some(absolutize(path)),
        None => discover_settings_upward(&start_dir),
    };

    match path {
        Some(path) => {
            log::debug!("[apilint-config] Loading settings from {}", path.display());
            let settings = load_settings_file(&path)?;
            let workspace_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.clone());
            Ok(LoadedSettings {
                settings,
                path: Some(path),
                workspace_root,
            })
        }
        None => {
            log::debug!("[apilint-config] No settings file found; using defaults");
            Ok(LoadedSettings {
                settings: Settings::default(),
                path: None,
                workspace_root: find_project_root_from(&start_dir),
            })
        }
    }
}

/// Walk up from `start_dir` looking for a settings file, stopping at a `.git` directory.
pub fn discover_settings_upward(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = absolutize(start_dir);

    for _ in 0..MAX_DEPTH {
        log::debug!("[apilint-config] Searching for settings in: {}", current_dir.display());

        for name in SETTINGS_FILES {
            let candidate = current_dir.join(name);
            if candidate.is_file() {
                log::debug!("[apilint-config] Found settings file: {}", candidate.display());
                return Some(candidate);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[apilint-config] Stopping at .git directory");
            return None;
        }

        if !current_dir.pop() {
            log::debug!("[apilint-config] Reached filesystem root");
            return None;
        }
    }

    log::debug!("[apilint-config] Maximum traversal depth reached");
    None
}

/// Nearest ancestor of `start_dir` (inclusive) that contains `.git`, or `start_dir` itself.
pub fn find_project_root_from(start_dir: &Path) -> PathBuf {
    let start_dir = absolutize(start_dir);
    let mut current = start_dir.clone();

    for _ in 0..MAX_DEPTH {
        if current.join(".git").exists() {
            log::debug!("[apilint-config] Found .git at: {}", current.display());
            return current;
        }
        if !current.pop() {
            break;
        }
    }

    log::debug!(
        "[apilint-config] No .git found, using {} as workspace root",
        start_dir.display()
    );
    start_dir
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

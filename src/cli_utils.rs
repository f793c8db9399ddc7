//! Settings plumbing shared by the command handlers.

use colored::*;
use std::path::{Path, PathBuf};

use apilint_lib::ApiLinter;
use apilint_lib::config::{self, LoadedSettings};
use apilint_lib::exit_codes::exit;

use crate::SettingsArgs;

/// Load the settings file (explicit or discovered) and overlay the command-line flags.
///
/// Exits with a tool error when the settings file cannot be read or parsed.
pub fn load_settings_with_cli_error_handling(args: &SettingsArgs) -> LoadedSettings {
    let start_dir = args
        .workspace
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let mut loaded = match config::load(args.settings.as_deref(), &start_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    };

    if let Some(workspace) = &args.workspace {
        loaded.workspace_root = absolute(workspace);
    }
    apply_overrides(&mut loaded.settings, args);

    if let Some(path) = &loaded.path {
        log::debug!("Using settings from {}", path.display());
    }
    log::debug!("Workspace root: {}", loaded.workspace_root.display());

    loaded
}

fn apply_overrides(settings: &mut config::Settings, args: &SettingsArgs) {
    if !args.command.is_empty() {
        settings.command = args.command.clone();
    }
    if let Some(lint_config) = &args.lint_config {
        settings.config_file = Some(lint_config.clone());
    }
    if !args.proto_paths.is_empty() {
        settings.proto_paths = args.proto_paths.clone();
    }
    if !args.directories.is_empty() {
        settings.directories = Some(args.directories.clone());
    }
}

/// Build a linter for the loaded settings. Exits with a tool error on invalid settings.
pub fn build_linter(loaded: &LoadedSettings) -> ApiLinter {
    let linter = ApiLinter::new(&loaded.workspace_root);
    if let Err(e) = linter.apply_settings(&loaded.settings) {
        eprintln!("{}: {}", "Config error".red().bold(), e);
        exit::tool_error();
    }
    linter
}

/// Express a command-line path the way the linter expects it: relative to the workspace root
/// when it lies inside it, absolute otherwise.
pub fn workspace_relative(file: &Path, workspace_root: &Path) -> PathBuf {
    let file = absolute(file);
    match file.strip_prefix(workspace_root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => file,
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_flags() {
        let mut settings = config::Settings {
            proto_paths: vec!["from-file".to_string()],
            ..config::Settings::default()
        };
        let args = SettingsArgs {
            command: vec!["go".to_string(), "run".to_string()],
            directories: vec!["apis/".to_string()],
            ..SettingsArgs::default()
        };
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.command, vec!["go", "run"]);
        assert_eq!(settings.proto_paths, vec!["from-file"]);
        assert_eq!(settings.directories, Some(vec!["apis/".to_string()]));
        assert_eq!(settings.config_file, None);
    }

    #[test]
    fn test_workspace_relative() {
        let root = Path::new("/ws");
        assert_eq!(workspace_relative(Path::new("/ws/a/b.proto"), root), PathBuf::from("a/b.proto"));
        assert_eq!(workspace_relative(Path::new("/other/b.proto"), root), PathBuf::from("/other/b.proto"));
    }
}

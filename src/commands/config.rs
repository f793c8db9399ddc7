//! Handler for the `config` command.

use colored::*;

use apilint_lib::exit_codes::exit;

use crate::SettingsArgs;
use crate::cli_utils::load_settings_with_cli_error_handling;

/// Print the effective settings, after command-line overrides, as TOML.
pub fn handle_config(args: &SettingsArgs) {
    let loaded = load_settings_with_cli_error_handling(args);

    let toml = loaded.settings.to_toml_string().unwrap_or_else(|e| {
        eprintln!("{}: {}", "Config error".red().bold(), e);
        exit::tool_error();
    });

    match &loaded.path {
        Some(path) => println!("# Settings file: {}", path.display()),
        None => println!("# No settings file found; using defaults"),
    }
    println!("# Workspace root: {}", loaded.workspace_root.display());
    println!();
    print!("{toml}");
}

//! Handler for the `probe` command.

use colored::*;

use apilint_lib::exit_codes::exit;

use crate::SettingsArgs;
use crate::cli_utils::{build_linter, load_settings_with_cli_error_handling};

/// Report whether the configured linter command is installed.
pub fn handle_probe(args: &SettingsArgs) {
    let loaded = load_settings_with_cli_error_handling(args);
    let linter = build_linter(&loaded);
    let command = linter.command().join(" ");

    match linter.ensure_installed() {
        Ok(()) => {
            println!("{} `{}` is installed", "✓".green(), command);
            exit::success();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

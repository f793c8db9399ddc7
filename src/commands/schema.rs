//! Handler for the `schema` command.

use colored::*;

use apilint_lib::config::Settings;
use apilint_lib::exit_codes::exit;

/// Print the JSON schema of the settings file.
pub fn handle_schema() {
    use schemars::schema_for;

    let schema = schema_for!(Settings);

    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("{}: Failed to serialize schema: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    println!("{schema_json}");
}

//! Handler for the `server` command.

use colored::*;

use apilint_lib::exit_codes::exit;

/// Handle the server command: start the LSP server.
pub fn handle_server(port: Option<u16>, stdio: bool, settings: Option<String>) {
    // Validate settings file exists if provided
    if let Some(settings_path) = &settings
        && !std::path::Path::new(settings_path).exists()
    {
        eprintln!(
            "{}: Settings file not found: {}",
            "Error".red().bold(),
            settings_path
        );
        exit::tool_error();
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("{}: Failed to create Tokio runtime: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    runtime.block_on(async {
        if let Some(port) = port {
            // TCP mode for debugging
            if let Err(e) = apilint_lib::lsp::start_tcp_server(port, settings.as_deref()).await {
                eprintln!("Failed to start LSP server on port {port}: {e}");
                exit::tool_error();
            }
        } else {
            // stdio is the default transport; the flag only documents it
            let _ = stdio;
            if let Err(e) = apilint_lib::lsp::start_server(settings.as_deref()).await {
                eprintln!("Failed to start LSP server: {e}");
                exit::tool_error();
            }
        }
    });
}

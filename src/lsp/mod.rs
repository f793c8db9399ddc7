//! Language Server Protocol implementation for apilint
//!
//! This module provides a Language Server Protocol (LSP) implementation that
//! runs api-linter on protobuf files as they are opened and saved.
//!
//! It is built directly into the main apilint binary and can be started
//! with `apilint server`.

pub mod server;
pub mod types;

pub use server::{ApiLinterLanguageServer, LintOutcome, UNSAVED_FILE_MESSAGE};
pub use types::{ApiLinterLspConfig, to_lsp_diagnostic};

use anyhow::Result;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the Language Server Protocol server
/// This is the main entry point for `apilint server`
pub async fn start_server(settings_path: Option<&str>) -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let settings_path = settings_path.map(str::to_string);
    let (service, socket) = LspService::new(move |client| ApiLinterLanguageServer::new(client, settings_path.clone()));

    log::info!("Starting apilint Language Server Protocol server");

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the LSP server over TCP (useful for debugging)
pub async fn start_tcp_server(port: u16, settings_path: Option<&str>) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    log::info!("apilint LSP server listening on 127.0.0.1:{port}");

    loop {
        let (stream, _) = listener.accept().await?;
        let settings_path = settings_path.map(str::to_string);
        let (service, socket) =
            LspService::new(move |client| ApiLinterLanguageServer::new(client, settings_path.clone()));

        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
        });
    }
}

//! Main Language Server Protocol server implementation for apilint
//!
//! The server lints protobuf documents when they are opened or saved and
//! publishes the resulting diagnostics. The linter itself blocks on a
//! subprocess, so every run happens on tokio's blocking pool.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};
use tower_lsp::jsonrpc::Result as JsonRpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config;
use crate::executor::{ProcessRunner, SystemRunner};
use crate::linter::{ApiLinter, LintError};
use crate::lsp::types::{ApiLinterLspConfig, is_proto_document, to_lsp_diagnostic};

pub const UNSAVED_FILE_MESSAGE: &str = "Cannot lint an unsaved file. Save the file in your workspace and try again.";

/// Linter shared between the server and its blocking lint tasks
type SharedLinter = ApiLinter<Arc<dyn ProcessRunner>>;

/// What a lint request produced for one document
#[derive(Debug, Clone, PartialEq)]
pub enum LintOutcome {
    /// Linting is disabled by the client
    Disabled,
    /// The document is not a file inside the workspace
    Unsaved,
    /// Diagnostics to publish
    Diagnostics(Vec<Diagnostic>),
    /// The configured command is not installed; carries the message shown to the user
    NotInstalled(String),
    /// The linter could not be run or its output could not be read
    Failed(String),
    /// A newer request for the same document was started while this one ran
    Superseded,
}

/// Main LSP server for apilint
pub struct ApiLinterLanguageServer {
    client: Client,
    /// Configuration sent by the client
    config: Arc<RwLock<ApiLinterLspConfig>>,
    /// Settings file given on the command line
    settings_path: Option<String>,
    /// Workspace root reported by the client
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
    linter: Arc<SharedLinter>,
    /// Source of request numbers; never reused, so closing a document cannot revive a stale request
    request_counter: AtomicU64,
    /// Latest request number per document; only that request's result is published
    generations: Arc<Mutex<HashMap<Url, u64>>>,
}

impl ApiLinterLanguageServer {
    pub fn new(client: Client, settings_path: Option<String>) -> Self {
        Self::with_runner(client, settings_path, Arc::new(SystemRunner))
    }

    /// Build a server that runs the linter through `runner`
    pub fn with_runner(client: Client, settings_path: Option<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self {
            client,
            config: Arc::new(RwLock::new(ApiLinterLspConfig::default())),
            settings_path,
            workspace_root: Arc::new(RwLock::new(None)),
            linter: Arc::new(ApiLinter::with_runner(runner, cwd)),
            request_counter: AtomicU64::new(0),
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Reload the settings file and apply the client's overrides to the linter.
    async fn reload_settings(&self) {
        let config = self.config.read().await.clone();
        let Some(workspace_root) = self.workspace_root.read().await.clone() else {
            log::debug!("No workspace root yet; keeping current settings");
            return;
        };

        let explicit = config.settings_path.clone().or_else(|| self.settings_path.clone());
        let explicit = explicit.map(|path| workspace_root.join(path));

        let mut settings = match config::load(explicit.as_deref(), &workspace_root) {
            Ok(loaded) => {
                if let Some(path) = &loaded.path {
                    log::info!("Loaded apilint settings from: {}", path.display());
                }
                loaded.settings
            }
            Err(e) => {
                log::warn!("Failed to load settings: {e}");
                self.client
                    .show_message(MessageType::WARNING, format!("apilint: {e}"))
                    .await;
                config::Settings::default()
            }
        };
        config.apply_to(&mut settings);

        self.linter.set_workspace_root(workspace_root);
        if let Err(e) = self.linter.apply_settings(&settings) {
            log::warn!("Invalid linter settings: {e}");
            self.client
                .show_message(MessageType::WARNING, format!("apilint: {e}"))
                .await;
        }
    }

    /// Start a new lint request for `uri` and return its generation.
    async fn next_generation(&self, uri: &Url) -> u64 {
        let generation = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.generations.lock().await.insert(uri.clone(), generation);
        generation
    }

    async fn is_current(&self, uri: &Url, generation: u64) -> bool {
        self.generations.lock().await.get(uri) == Some(&generation)
    }

    /// Lint a document without touching the client
    pub async fn lint_document(&self, uri: &Url) -> LintOutcome {
        if !self.config.read().await.enable_linting {
            return LintOutcome::Disabled;
        }

        let workspace_root = self.linter.workspace_root();
        let Some(relative) = uri
            .to_file_path()
            .ok()
            .and_then(|path| path.strip_prefix(&workspace_root).ok().map(|p| p.to_path_buf()))
        else {
            return LintOutcome::Unsaved;
        };

        log::debug!("Linting {}", relative.display());

        let generation = self.next_generation(uri).await;
        let linter = Arc::clone(&self.linter);
        let result = tokio::task::spawn_blocking(move || {
            linter.ensure_installed()?;
            linter.lint(&relative)
        })
        .await;

        if !self.is_current(uri, generation).await {
            log::debug!("Discarding stale lint result for {uri}");
            return LintOutcome::Superseded;
        }

        match result {
            Ok(Ok(diagnostics)) => LintOutcome::Diagnostics(diagnostics.iter().map(to_lsp_diagnostic).collect()),
            Ok(Err(e @ LintError::ToolNotInstalled { .. })) => LintOutcome::NotInstalled(e.to_string()),
            Ok(Err(e)) => {
                log::error!("Failed to lint {uri}: {e}");
                LintOutcome::Failed(format!("api-linter failed: {e}"))
            }
            Err(e) => {
                log::error!("Lint task for {uri} did not complete: {e}");
                LintOutcome::Failed(format!("api-linter failed: {e}"))
            }
        }
    }

    /// Lint a document and publish its diagnostics
    async fn lint_and_publish(&self, uri: Url) {
        match self.lint_document(&uri).await {
            LintOutcome::Diagnostics(diagnostics) => {
                self.client.publish_diagnostics(uri, diagnostics, None).await;
            }
            LintOutcome::Unsaved => {
                self.client.show_message(MessageType::ERROR, UNSAVED_FILE_MESSAGE).await;
            }
            LintOutcome::NotInstalled(message) | LintOutcome::Failed(message) => {
                self.client.show_message(MessageType::ERROR, message).await;
            }
            LintOutcome::Disabled | LintOutcome::Superseded => {}
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ApiLinterLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> JsonRpcResult<InitializeResult> {
        log::info!("Initializing apilint Language Server");

        if let Some(options) = params.initialization_options {
            match ApiLinterLspConfig::from_value(options) {
                Ok(config) => *self.config.write().await = config,
                Err(e) => log::warn!("Ignoring invalid initialization options: {e}"),
            }
        }

        #[allow(deprecated)]
        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.clone())
            .or(params.root_uri)
            .and_then(|uri| uri.to_file_path().ok());
        if let Some(root) = root {
            log::info!("Workspace root: {}", root.display());
            *self.workspace_root.write().await = Some(root);
        }

        self.reload_settings().await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::NONE),
                    save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    ..Default::default()
                })),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "apilint".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("apilint Language Server initialized");

        self.client
            .log_message(MessageType::INFO, "apilint Language Server started")
            .await;
    }

    async fn shutdown(&self) -> JsonRpcResult<()> {
        log::info!("Shutting down apilint Language Server");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match ApiLinterLspConfig::from_value(params.settings) {
            Ok(config) => {
                *self.config.write().await = config;
                self.reload_settings().await;
            }
            Err(e) => log::warn!("Ignoring invalid configuration: {e}"),
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        if is_proto_document(&document.uri, Some(&document.language_id)) {
            self.lint_and_publish(document.uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if is_proto_document(&uri, None) {
            self.lint_and_publish(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.generations.lock().await.remove(&uri);

        // Clear diagnostics
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

//! LSP type definitions and utilities for apilint
//!
//! This module contains LSP-specific types and conversions between the
//! linter's diagnostics and the Language Server Protocol's.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types as lsp;
use tower_lsp::lsp_types::Url;

use crate::config::Settings;
use crate::diagnostic::{Diagnostic, Severity};

/// `source` attached to every published diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "api-linter";

/// Section of `workspace/didChangeConfiguration` settings read by the server
pub const SETTINGS_SECTION: &str = "apiLinter";

/// File extension of protobuf sources
const PROTO_EXTENSION: &str = "proto";

/// Configuration sent by the client in `initializationOptions` or `workspace/didChangeConfiguration`
///
/// Every field overrides the settings file when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiLinterLspConfig {
    /// Explicit path to an apilint settings file
    pub settings_path: Option<String>,
    /// Enable/disable linting
    pub enable_linting: bool,
    pub command: Option<Vec<String>>,
    #[serde(alias = "config-file", alias = "config_file")]
    pub config_file: Option<String>,
    #[serde(alias = "proto-paths", alias = "proto_paths")]
    pub proto_paths: Option<Vec<String>>,
    pub directories: Option<Vec<String>>,
}

impl Default for ApiLinterLspConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            enable_linting: true,
            command: None,
            config_file: None,
            proto_paths: None,
            directories: None,
        }
    }
}

impl ApiLinterLspConfig {
    /// Parse client settings, accepting either the bare object or one nested under `apiLinter`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match value {
            serde_json::Value::Object(mut map) if map.contains_key(SETTINGS_SECTION) => {
                Self::from_value(map.remove(SETTINGS_SECTION).unwrap_or_default())
            }
            serde_json::Value::Null => Ok(Self::default()),
            value => serde_json::from_value(value),
        }
    }

    /// Overlay the client's values on top of the settings file.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(command) = self.command.as_ref().filter(|command| !command.is_empty()) {
            settings.command = command.clone();
        }
        if let Some(config_file) = &self.config_file {
            settings.config_file = Some(config_file.clone());
        }
        if let Some(proto_paths) = &self.proto_paths {
            settings.proto_paths = proto_paths.clone();
        }
        if let Some(directories) = &self.directories {
            settings.directories = Some(directories.clone());
        }
    }
}

/// Whether a document should be linted, by language id when known and by extension otherwise.
pub fn is_proto_document(uri: &Url, language_id: Option<&str>) -> bool {
    match language_id {
        Some("proto" | "proto3") => true,
        Some(_) => false,
        None => uri
            .path()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(PROTO_EXTENSION)),
    }
}

fn to_lsp_position(position: crate::diagnostic::Position) -> lsp::Position {
    lsp::Position {
        line: position.line,
        character: position.character,
    }
}

/// Convert a linter diagnostic to an LSP diagnostic
pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> lsp::Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => lsp::DiagnosticSeverity::ERROR,
        Severity::Warning => lsp::DiagnosticSeverity::WARNING,
    };

    lsp::Diagnostic {
        range: lsp::Range {
            start: to_lsp_position(diagnostic.range.start),
            end: to_lsp_position(diagnostic.range.end),
        },
        severity: Some(severity),
        code: diagnostic.rule_id.clone().map(lsp::NumberOrString::String),
        code_description: diagnostic
            .rule_doc_uri
            .as_deref()
            .and_then(|uri| Url::parse(uri).ok())
            .map(|href| lsp::CodeDescription { href }),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

use std::{path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use tower_lsp::{Client, lsp_types::WorkspaceFolder};

use crate::{document::DocumentStore, server::settings::ServerSettings};

/// The preproc-navigator backend that implements the Language Server Protocol.
pub struct PreprocLanguageServer {
    /// The LSP client handle, used to send notifications and showDocument
    /// requests back to the editor.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Workspace root folders, populated during `initialize`. Relative
    /// directive paths resolve against the first root.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl PreprocLanguageServer {
    /// Create a new `PreprocLanguageServer` wired to the given LSP client.
    ///
    /// `_log_messages` is accepted for CLI compatibility but message-level
    /// logging is controlled entirely through the `tracing` subscriber.
    pub fn new(
        client: Client,
        _log_messages: bool,
    ) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            workspace_roots: RwLock::new(Vec::new()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }

    /// Workspace roots as filesystem paths, in the order the client sent them.
    pub(crate) async fn workspace_root_paths(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|folder| folder.uri.to_file_path().ok()).collect()
    }
}

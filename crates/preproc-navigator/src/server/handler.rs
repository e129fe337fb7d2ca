use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::Deserialize;
use serde_json::Value;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    directive::{CursorContext, ResolvedLocation, locate_origin, resolve_position},
    document::Document,
    server::{
        messages,
        navigation::{NavigationError, load_target, resolve_target_path},
        settings::ServerSettings,
        state::PreprocLanguageServer,
    },
};

/// Reveal, within the current document, the line where the directive path was
/// first introduced.
pub const REVEAL_ORIGIN_COMMAND: &str = "preproc-navigator.revealOrigin";

/// Open the original source file the cursor position is attributed to.
pub const OPEN_TARGET_COMMAND: &str = "preproc-navigator.openTarget";

/// Cursor state clients attach to `workspace/executeCommand` invocations.
#[derive(Debug, Deserialize)]
struct CommandArgs {
    uri: Url,
    position: Position,
}

#[tower_lsp::async_trait]
impl LanguageServer for PreprocLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing preproc-navigator...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                definition_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![REVEAL_ORIGIN_COMMAND.to_string(), OPEN_TARGET_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "preproc-navigator".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("preproc-navigator initialized");
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated preproc-navigator settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down preproc-navigator");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);
        let settings = self.settings_snapshot().await;

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        if settings.logging.level.allows_info() && settings.documents.matches(&uri) {
            let _ = AssertUnwindSafe(
                self.client.log_message(MessageType::INFO, messages::prefixed(format!("Opened {filename}"))),
            )
            .catch_unwind()
            .await;
        }

        self.document_store.open(uri, text, version);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        self.document_store.apply_changes(&uri, params.content_changes, version);
    }

    async fn did_save(
        &self,
        params: DidSaveTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Saved {}", short_name(&uri));

        // Re-sync from the saved text when the client includes it.
        if let Some(text) = params.text {
            let version = self.document_store.get(&uri).map(|doc| doc.version).unwrap_or(0);
            self.document_store.update(uri, text, version);
        }
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        self.document_store.close(&params.text_document.uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let (_, resolved) = match self.resolve_at(&uri, position.line).await {
            Ok(hit) => hit,
            Err(message) => {
                self.client.show_message(MessageType::INFO, message).await;
                return Ok(None);
            },
        };
        self.notify_resolved(&resolved).await;

        match self.open_target(&uri, &resolved).await {
            Ok(location) => {
                info!(
                    "Resolved {} -> {}:{}",
                    short_name(&uri),
                    resolved.target_file,
                    location.range.start.line + 1
                );
                Ok(Some(GotoDefinitionResponse::Scalar(location)))
            },
            Err(message) => {
                self.client.show_message(MessageType::ERROR, message).await;
                Ok(None)
            },
        }
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>> {
        match params.command.as_str() {
            REVEAL_ORIGIN_COMMAND => {
                let Some(args) = parse_command_args(&params.arguments) else {
                    warn!("{REVEAL_ORIGIN_COMMAND} called without cursor arguments");
                    return Ok(None);
                };
                self.reveal_origin(args).await;
                Ok(None)
            },
            OPEN_TARGET_COMMAND => {
                let Some(args) = parse_command_args(&params.arguments) else {
                    warn!("{OPEN_TARGET_COMMAND} called without cursor arguments");
                    return Ok(None);
                };
                self.open_target_command(args).await;
                Ok(None)
            },
            other => {
                warn!("Unknown command: {other}");
                Ok(None)
            },
        }
    }
}

impl PreprocLanguageServer {
    /// Run the position resolver at a cursor line of a tracked document.
    ///
    /// Every failure mode collapses into the notification message the caller
    /// should surface; nothing here is fatal.
    async fn resolve_at(
        &self,
        uri: &Url,
        cursor_line: u32,
    ) -> std::result::Result<(Document, ResolvedLocation), String> {
        let settings = self.settings_snapshot().await;
        if !settings.documents.matches(uri) {
            debug!("{} is not a preprocessed source", short_name(uri));
            return Err(messages::not_preprocessed_source());
        }

        let Some(document) = self.document_store.get(uri) else {
            debug!("{} is not tracked", short_name(uri));
            return Err(messages::not_preprocessed_source());
        };

        let cursor = CursorContext {
            lines: &document,
            cursor_line: cursor_line as usize,
        };
        match resolve_position(cursor) {
            Ok(resolved) => Ok((document, resolved)),
            Err(error) => {
                debug!("Resolution failed for {} at line {cursor_line}: {error}", short_name(uri));
                Err(messages::no_line_directive_found())
            },
        }
    }

    /// Cosmetic success notification, gated by settings.
    async fn notify_resolved(
        &self,
        resolved: &ResolvedLocation,
    ) {
        if self.settings_snapshot().await.notifications.show_resolved {
            self.client
                .show_message(MessageType::INFO, messages::resolved(&resolved.target_file, resolved.target_line))
                .await;
        }
    }

    /// Load the resolved original file and build a clamped cursor location.
    async fn open_target(
        &self,
        uri: &Url,
        resolved: &ResolvedLocation,
    ) -> std::result::Result<Location, String> {
        let roots = self.workspace_root_paths().await;
        let current = uri.to_file_path().ok();
        let path = resolve_target_path(&resolved.target_file, &roots, current.as_deref());

        load_target(&path, resolved.target_line).await.map_err(|error| {
            warn!("Opening target failed: {error}");
            match error {
                NavigationError::TargetFileMissing(path) => messages::file_not_exist(&path.display().to_string()),
                NavigationError::TargetLoadFailure {
                    path,
                    reason,
                } => messages::path_resolve_failed(&path.display().to_string(), &reason),
            }
        })
    }

    /// `preproc-navigator.revealOrigin`: jump, within the current document,
    /// to the first directive that introduces the resolved path.
    async fn reveal_origin(
        &self,
        args: CommandArgs,
    ) {
        let (document, resolved) = match self.resolve_at(&args.uri, args.position.line).await {
            Ok(hit) => hit,
            Err(message) => {
                self.client.show_message(MessageType::INFO, message).await;
                return;
            },
        };
        self.notify_resolved(&resolved).await;

        match locate_origin(&document, &resolved.target_file) {
            Ok(origin_line) => {
                let position = Position::new(origin_line - 1, 0);
                self.show_document(args.uri, Range::new(position, position)).await;
            },
            Err(error) => {
                debug!("Origin lookup failed for {}: {error}", resolved.target_file);
                self.client.show_message(MessageType::ERROR, messages::origin_line_not_found()).await;
            },
        }
    }

    /// `preproc-navigator.openTarget`: open the resolved original file at the
    /// declared (clamped) line.
    async fn open_target_command(
        &self,
        args: CommandArgs,
    ) {
        let (_, resolved) = match self.resolve_at(&args.uri, args.position.line).await {
            Ok(hit) => hit,
            Err(message) => {
                self.client.show_message(MessageType::INFO, message).await;
                return;
            },
        };
        self.notify_resolved(&resolved).await;

        match self.open_target(&args.uri, &resolved).await {
            Ok(location) => {
                self.show_document(location.uri, location.range).await;
            },
            Err(message) => {
                self.client.show_message(MessageType::ERROR, message).await;
            },
        }
    }

    /// Ask the client to reveal a document with the selection placed at
    /// `selection`. Failures are logged, never surfaced; the host may simply
    /// lack `window/showDocument` support.
    async fn show_document(
        &self,
        uri: Url,
        selection: Range,
    ) {
        let params = ShowDocumentParams {
            uri,
            external: Some(false),
            take_focus: Some(true),
            selection: Some(selection),
        };
        let result = AssertUnwindSafe(self.client.show_document(params)).catch_unwind().await;
        match result {
            Ok(Err(error)) => warn!("showDocument request failed: {error}"),
            Err(_) => warn!("showDocument panicked (client may have disconnected)"),
            Ok(Ok(_)) => {},
        }
    }
}

fn parse_command_args(arguments: &[Value]) -> Option<CommandArgs> {
    serde_json::from_value(arguments.first()?.clone()).ok()
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

//! LSP backend.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{
    UnboundedSender,
    unbounded_channel,
};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    ExecuteCommandParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::notification::DidChangeTranslations;
use super::state::ServerState;
use crate::config::{
    ConfigManager,
    EditorSettings,
};
use crate::editor::{
    Editor,
    EditorEvent,
    LoadReport,
};
use crate::store::{
    JsonFileStore,
    StoreError,
};

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    pub client: Client,
    pub config_manager: Arc<Mutex<ConfigManager>>,
    pub state: ServerState,
    /// Editor events waiting to be forwarded to the client
    events: UnboundedSender<EditorEvent>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// Create the backend and start forwarding editor events as
    /// `i18nEditor/didChange` notifications.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(client: Client) -> Self {
        let (events, mut receiver) = unbounded_channel::<EditorEvent>();

        let forwarder = client.clone();
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                forwarder.send_notification::<DidChangeTranslations>(event).await;
            }
        });

        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(),
            events,
        }
    }

    /// Build an editor over `workspace_root` with the given settings.
    ///
    /// Nothing is loaded yet.
    pub(crate) fn create_editor(
        &self,
        workspace_root: &Path,
        settings: &EditorSettings,
    ) -> std::result::Result<Editor, StoreError> {
        let store =
            JsonFileStore::new(workspace_root, &settings.translation_files.file_pattern)?;
        let mut editor = Editor::new(store, settings.editor_options());

        let events = self.events.clone();
        editor.subscribe(move |event| {
            let _ = events.send(event.clone());
        });

        Ok(editor)
    }

    /// Report per-file load failures to the user.
    pub(crate) async fn report_load(&self, report: &LoadReport) {
        for failure in &report.failures {
            self.client
                .show_message(MessageType::WARNING, format!("Failed to load {failure}"))
                .await;
        }
        self.client
            .log_message(
                MessageType::INFO,
                format!("Loaded {} translation file(s)", report.loaded.len()),
            )
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }
}

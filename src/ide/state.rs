//! Shared state of the language server.

use std::sync::Arc;

use tokio::sync::{
    Mutex,
    MutexGuard,
};

use crate::editor::Editor;

/// State shared between handlers.
///
/// The editor is created in `initialize`, once the workspace root is known,
/// and replaced when the configuration changes. Every command holds the lock
/// for its whole duration.
#[derive(Clone, Default)]
pub struct ServerState {
    pub editor: Arc<Mutex<Option<Editor>>>,
}

impl ServerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_editor(&self) -> MutexGuard<'_, Option<Editor>> {
        self.editor.lock().await
    }

    pub async fn replace_editor(&self, editor: Editor) {
        *self.editor.lock().await = Some(editor);
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState").field("editor", &"<Option<Editor>>").finish()
    }
}

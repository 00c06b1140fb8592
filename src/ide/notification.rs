//! Custom notifications sent to the client.

use tower_lsp::lsp_types::notification::Notification;

use crate::editor::EditorEvent;

/// `i18nEditor/didChange`: the translation set, query or files changed.
///
/// Clients refresh their view with `i18nEditor.getView` on receipt.
#[derive(Debug, Clone, Copy)]
pub enum DidChangeTranslations {}

impl Notification for DidChangeTranslations {
    type Params = EditorEvent;

    const METHOD: &'static str = "i18nEditor/didChange";
}

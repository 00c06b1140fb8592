//! Workspace-related handlers.

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    MessageType,
};

use super::super::backend::Backend;
use crate::config::{
    ConfigError,
    EditorSettings,
};
use crate::editor::{
    Editor,
    EditorError,
    LoadReport,
};
use crate::store::StoreError;

/// Top-level fields of [`EditorSettings`]; a bare object needs one of them.
const SETTINGS_FIELDS: [&str; 4] = ["translationFiles", "languageSuffix", "autoSave", "search"];

/// Settings nested under the server's section, as VS Code sends them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerSettings {
    i18n_editor: EditorSettings,
}

/// Extract editor settings from a `didChangeConfiguration` payload.
///
/// Accepts `{ "i18nEditor": { ... } }` or the settings object itself. A bare
/// object without any settings field belongs to some other tool and is
/// ignored.
fn parse_settings(settings: Value) -> Option<EditorSettings> {
    if let Ok(wrapped) = serde_json::from_value::<ServerSettings>(settings.clone()) {
        return Some(wrapped.i18n_editor);
    }

    let is_bare = settings
        .as_object()
        .is_some_and(|object| SETTINGS_FIELDS.iter().any(|field| object.contains_key(*field)));
    if !is_bare {
        return None;
    }
    serde_json::from_value(settings).ok()
}

/// Replace `editor` with one built over a different set of files.
///
/// Pending edits are saved through the current editor first. On any error the
/// current editor stays in place.
fn switch_editor(
    editor: &mut Editor,
    build: impl FnOnce() -> Result<Editor, StoreError>,
) -> Result<LoadReport, EditorError> {
    if editor.has_unsaved_changes() {
        let saved = editor.save().map_err(EditorError::Save)?;
        tracing::info!(saved, "Saved pending edits before switching translation files");
    }

    let mut replacement = build()?;
    let report = replacement.load_all()?;
    *editor = replacement;
    Ok(report)
}

pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let Some(new_settings) = parse_settings(params.settings) else {
        tracing::debug!("Ignoring configuration without editor settings");
        return;
    };

    if let Err(errors) = new_settings.validate() {
        let error = ConfigError::ValidationErrors(errors);
        tracing::error!(%error, "configuration validation error");
        backend
            .client
            .show_message(MessageType::ERROR, format!("Invalid configuration: {error}"))
            .await;
        return;
    }

    // Held until the editor matches the new settings, so both change together.
    let mut config_manager = backend.config_manager.lock().await;
    let rebuild = config_manager.requires_rebuild(&new_settings);
    let workspace_root = config_manager.workspace_root().map(ToOwned::to_owned);

    let mut guard = backend.state.lock_editor().await;
    let switched = match (guard.as_mut(), workspace_root) {
        (Some(editor), Some(root)) if rebuild => {
            Some(switch_editor(editor, || backend.create_editor(&root, &new_settings)))
        }
        (Some(editor), _) => {
            editor.apply_options(new_settings.editor_options());
            None
        }
        (None, _) => None,
    };
    drop(guard);

    if let Some(Err(error)) = &switched {
        drop(config_manager);
        tracing::warn!(%error, "Keeping current translation files");
        backend
            .client
            .show_message(
                MessageType::WARNING,
                format!("Translation files were not switched: {error}"),
            )
            .await;
        return;
    }

    if let Err(error) = config_manager.update_settings(new_settings) {
        tracing::error!(%error, "configuration validation error");
    }
    drop(config_manager);
    tracing::info!("configuration updated successfully");

    if let Some(Ok(report)) = switched {
        backend.report_load(&report).await;
    }
}

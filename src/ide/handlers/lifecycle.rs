//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use std::path::PathBuf;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandOptions,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    ServerCapabilities,
    ServerInfo,
    WorkDoneProgressOptions,
};

use super::super::backend::Backend;
use super::execute_command::COMMANDS;

/// First workspace folder, falling back to the deprecated `rootUri`.
#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(|uri| uri.to_file_path().ok())
}

pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let workspace_root = workspace_root(&params);

    let mut config_manager = backend.config_manager.lock().await;
    if let Err(error) = config_manager.load_settings(workspace_root.clone()) {
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
        tracing::error!("Configuration error during initialize: {}", error);
    }
    let settings = config_manager.get_settings().clone();
    drop(config_manager);

    if let Some(root) = &workspace_root {
        match backend.create_editor(root, &settings) {
            Ok(editor) => backend.state.replace_editor(editor).await,
            Err(error) => {
                tracing::error!(%error, "Failed to create editor");
                backend
                    .client
                    .show_message(MessageType::ERROR, format!("Cannot open workspace: {error}"))
                    .await;
            }
        }
    } else {
        tracing::warn!("No workspace root; translation editing is unavailable");
    }

    Ok(InitializeResult {
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        capabilities: ServerCapabilities {
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: COMMANDS.iter().map(ToString::to_string).collect(),
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            ..ServerCapabilities::default()
        },
    })
}

pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "initialized!").await;

    let mut guard = backend.state.lock_editor().await;
    let Some(editor) = guard.as_mut() else {
        return;
    };

    match editor.load_all() {
        Ok(report) => {
            drop(guard);
            backend.report_load(&report).await;
        }
        Err(error) => {
            drop(guard);
            tracing::error!(%error, "Failed to scan workspace");
            backend
                .client
                .show_message(MessageType::ERROR, format!("Failed to scan workspace: {error}"))
                .await;
        }
    }
}

#[allow(clippy::unused_async)]
pub async fn handle_shutdown() -> Result<()> {
    Ok(())
}

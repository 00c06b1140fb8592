//! Execute Command handler
//!
//! Every editor operation is exposed as a `workspace/executeCommand` command.
//! Arguments are passed as a single camelCase object in `arguments[0]`.

use serde::{
    Deserialize,
    Serialize,
};
use serde::de::DeserializeOwned;
use serde_json::{
    Value,
    json,
};
use tower_lsp::jsonrpc::{
    Error,
    ErrorCode,
    Result,
};
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    MessageType,
};

use super::super::backend::Backend;
use crate::editor::{
    Editor,
    EditorError,
};
use crate::model::LanguageValues;
use crate::search::{
    FilteredView,
    Stats,
};

pub const GET_VIEW: &str = "i18nEditor.getView";
pub const SET_QUERY: &str = "i18nEditor.setQuery";
pub const ADD_LANGUAGE: &str = "i18nEditor.addLanguage";
pub const REMOVE_LANGUAGE: &str = "i18nEditor.removeLanguage";
pub const ADD_KEY: &str = "i18nEditor.addKey";
pub const RENAME_KEY: &str = "i18nEditor.renameKey";
pub const DELETE_KEY: &str = "i18nEditor.deleteKey";
pub const SAVE: &str = "i18nEditor.save";
pub const RELOAD: &str = "i18nEditor.reload";
pub const SET_AUTO_SAVE: &str = "i18nEditor.setAutoSave";
pub const FIND_KEY: &str = "i18nEditor.findKey";
pub const GET_STATUS: &str = "i18nEditor.getStatus";

/// Commands advertised in `initialize`.
pub const COMMANDS: &[&str] = &[
    GET_VIEW,
    SET_QUERY,
    ADD_LANGUAGE,
    REMOVE_LANGUAGE,
    ADD_KEY,
    RENAME_KEY,
    DELETE_KEY,
    SAVE,
    RELOAD,
    SET_AUTO_SAVE,
    FIND_KEY,
    GET_STATUS,
];

/// JSON-RPC error code for rejected editor operations.
const EDITOR_ERROR_CODE: i64 = -32001;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetQueryArgs {
    #[serde(default)]
    query: String,
    match_keys: Option<bool>,
    match_values: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct LanguageArgs {
    language: String,
}

#[derive(Debug, Deserialize)]
struct AddKeyArgs {
    key: String,
    #[serde(default)]
    values: LanguageValues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenameKeyArgs {
    old_key: String,
    new_key: String,
    #[serde(default)]
    values: LanguageValues,
}

#[derive(Debug, Deserialize)]
struct KeyArgs {
    key: String,
}

#[derive(Debug, Deserialize)]
struct SetAutoSaveArgs {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct FindKeyArgs {
    prefix: String,
}

/// Everything a client needs to render the editor table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewSnapshot<'a> {
    #[serde(flatten)]
    view: &'a FilteredView,
    stats: Stats,
    status_line: String,
    auto_save: bool,
}

impl<'a> ViewSnapshot<'a> {
    fn of(editor: &'a Editor) -> Self {
        let stats = editor.stats();
        Self {
            view: editor.view(),
            status_line: stats.to_string(),
            stats,
            auto_save: editor.auto_save(),
        }
    }
}

/// Handle a `workspace/executeCommand` request.
///
/// Malformed arguments are logged and answered with `null`. Rejected
/// operations are shown to the user and returned as JSON-RPC errors.
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    if !COMMANDS.contains(&params.command.as_str()) {
        tracing::warn!("Unknown command: {}", params.command);
        return Ok(None);
    }

    let mut guard = backend.state.lock_editor().await;
    let Some(editor) = guard.as_mut() else {
        tracing::warn!(command = %params.command, "No workspace is open");
        return Err(Error {
            code: ErrorCode::ServerError(EDITOR_ERROR_CODE),
            message: "No workspace is open".into(),
            data: None,
        });
    };

    let outcome = run_command(editor, &params.command, params.arguments.first().cloned());
    drop(guard);

    match outcome {
        CommandOutcome::Done(value) => Ok(Some(value)),
        CommandOutcome::InvalidArguments(message) => {
            tracing::warn!("Invalid arguments for {}: {}", params.command, message);
            Ok(None)
        }
        CommandOutcome::Loaded(value, failures) => {
            for failure in failures {
                backend.client.show_message(MessageType::WARNING, failure).await;
            }
            Ok(Some(value))
        }
        CommandOutcome::Failed(EditorError::AutoSave(error), value) => {
            backend.client.show_message(MessageType::WARNING, error.to_string()).await;
            Ok(Some(value))
        }
        CommandOutcome::Failed(error, _) => {
            backend.client.show_message(MessageType::ERROR, error.to_string()).await;
            Err(editor_error(&error))
        }
    }
}

/// Result of running one command against the editor.
#[derive(Debug)]
enum CommandOutcome {
    Done(Value),
    InvalidArguments(String),
    /// Languages were (re)loaded; some files may have failed
    Loaded(Value, Vec<String>),
    /// The editor refused or only partly applied the operation.
    /// The value is returned to the client for `AutoSave` failures.
    Failed(EditorError, Value),
}

/// Dispatch one known command. Holds no locks and sends nothing.
fn run_command(editor: &mut Editor, command: &str, argument: Option<Value>) -> CommandOutcome {
    match command {
        GET_VIEW => snapshot(editor),
        SET_QUERY => with_args(argument, |args: SetQueryArgs| {
            let match_keys = args.match_keys.unwrap_or(editor.query().match_keys);
            let match_values = args.match_values.unwrap_or(editor.query().match_values);
            editor.set_query(&args.query, match_keys, match_values);
            snapshot(editor)
        }),
        ADD_LANGUAGE => with_args(argument, |args: LanguageArgs| {
            let result = editor.add_language(&args.language);
            applied(result.map(|language| json!({ "language": language })))
        }),
        REMOVE_LANGUAGE => with_args(argument, |args: LanguageArgs| {
            let result = editor.remove_language(&args.language);
            applied(result.map(|language| json!({ "language": language })))
        }),
        ADD_KEY => with_args(argument, |args: AddKeyArgs| {
            let result = editor.add_key(&args.key, &args.values);
            applied(result.map(|()| json!({ "key": args.key.trim() })))
        }),
        RENAME_KEY => with_args(argument, |args: RenameKeyArgs| {
            let result = editor.rename_key(&args.old_key, &args.new_key, &args.values);
            applied(result.map(|()| json!({ "key": args.new_key.trim() })))
        }),
        DELETE_KEY => with_args(argument, |args: KeyArgs| {
            applied(editor.delete_key(&args.key).map(|removed| json!({ "removed": removed })))
        }),
        SAVE => match editor.save() {
            Ok(saved) => CommandOutcome::Done(json!({ "saved": saved })),
            Err(error) => {
                let saved = error.saved;
                CommandOutcome::Failed(EditorError::Save(error), json!({ "saved": saved }))
            }
        },
        RELOAD => match editor.reload() {
            Ok(report) => CommandOutcome::Loaded(
                json!({ "loaded": report.loaded.len(), "failed": report.failures.len() }),
                report.failures.iter().map(|failure| format!("Failed to load {failure}")).collect(),
            ),
            Err(error) => CommandOutcome::Failed(error, Value::Null),
        },
        SET_AUTO_SAVE => with_args(argument, |args: SetAutoSaveArgs| {
            editor.set_auto_save(args.enabled);
            CommandOutcome::Done(json!({ "autoSave": editor.auto_save() }))
        }),
        FIND_KEY => with_args(argument, |args: FindKeyArgs| {
            CommandOutcome::Done(json!({ "key": editor.view().first_key_with_prefix(&args.prefix) }))
        }),
        GET_STATUS => {
            let stats = editor.stats();
            CommandOutcome::Done(json!({ "text": stats.to_string(), "stats": stats }))
        }
        _ => CommandOutcome::InvalidArguments(format!("unsupported command {command}")),
    }
}

fn snapshot(editor: &Editor) -> CommandOutcome {
    match serde_json::to_value(ViewSnapshot::of(editor)) {
        Ok(value) => CommandOutcome::Done(value),
        Err(e) => {
            tracing::error!("Failed to serialize view: {}", e);
            CommandOutcome::Done(Value::Null)
        }
    }
}

fn applied(result: std::result::Result<Value, EditorError>) -> CommandOutcome {
    match result {
        Ok(value) => CommandOutcome::Done(value),
        Err(error) => CommandOutcome::Failed(error, Value::Null),
    }
}

/// Parse `arguments[0]` and run `f` with it.
fn with_args<T: DeserializeOwned>(
    argument: Option<Value>,
    f: impl FnOnce(T) -> CommandOutcome,
) -> CommandOutcome {
    let Some(argument) = argument else {
        return CommandOutcome::InvalidArguments("missing arguments".to_string());
    };
    match serde_json::from_value(argument) {
        Ok(args) => f(args),
        Err(e) => CommandOutcome::InvalidArguments(e.to_string()),
    }
}

fn editor_error(error: &EditorError) -> Error {
    Error {
        code: ErrorCode::ServerError(EDITOR_ERROR_CODE),
        message: error.to_string().into(),
        data: None,
    }
}

//! i18n-json-editor
//!
//! Editing engine for flat JSON translation files, one file per language,
//! served to editors over the Language Server Protocol.

pub mod config;
pub mod editor;
pub mod ide;
pub mod model;
pub mod search;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod types;

pub use editor::{
    Editor,
    EditorOptions,
};
pub use ide::backend::Backend;

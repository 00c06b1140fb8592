//! LSP front end for the editor.

pub mod backend;
mod handlers;
pub mod notification;
pub mod state;

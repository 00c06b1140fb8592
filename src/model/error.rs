use thiserror::Error;

use crate::types::LanguageId;

/// Rejected translation set mutations.
///
/// A mutation that returns one of these has not changed the set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Language '{0}' already exists")]
    DuplicateLanguage(LanguageId),

    #[error("Language '{0}' not found")]
    LanguageNotFound(LanguageId),

    #[error("Key '{0}' already exists")]
    DuplicateKey(String),

    #[error("Key cannot be empty")]
    EmptyKey,

    #[error("Language name cannot be empty")]
    EmptyLanguageId,
}

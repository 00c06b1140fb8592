use thiserror::Error;

use crate::model::ModelError;
use crate::store::StoreError;
use crate::types::LanguageId;

/// A store failure attributed to one language.
#[derive(Error, Debug)]
#[error("{language}: {error}")]
pub struct LanguageFailure {
    pub language: LanguageId,
    #[source]
    pub error: StoreError,
}

/// Every failure of one save batch.
///
/// Saving continues past a failing file, so this lists all of them.
#[derive(Error, Debug)]
#[error("Failed to save {} translation file(s):\n{}", .failures.len(), format_failures(.failures))]
pub struct SaveError {
    /// Files written successfully in the same batch
    pub saved: usize,
    pub failures: Vec<LanguageFailure>,
}

fn format_failures(failures: &[LanguageFailure]) -> String {
    failures
        .iter()
        .enumerate()
        .map(|(i, failure)| format!("  {}. {failure}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Debug)]
pub enum EditorError {
    /// The mutation was rejected; nothing changed
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// An explicit save failed
    #[error(transparent)]
    Save(SaveError),

    /// The mutation was applied in memory, but persisting it failed
    #[error("Change applied but auto-save failed: {0}")]
    AutoSave(SaveError),
}

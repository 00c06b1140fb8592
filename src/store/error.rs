use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, writing or discovering language files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file of a language does not exist
    #[error("Translation file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// The file exists but could not be read
    #[error("Failed to read translation file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The text is not a flat JSON object of strings, even after comma repair
    #[error("Failed to parse translation file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The rendered text could not be written
    #[error("Failed to write translation file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The mapping could not be rendered as JSON
    #[error("Failed to serialize translations for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The language id cannot be used as a file name
    #[error("Invalid language file name '{0}'")]
    InvalidLanguageId(String),
    /// Language file discovery failed
    #[error("Failed to scan for translation files: {0}")]
    Scan(String),
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

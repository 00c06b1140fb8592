//! Persistence of language files.
pub mod discovery;
/// Store error types
mod error;
pub mod json;

use std::fmt::Debug;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use globset::GlobMatcher;

pub use error::StoreError;

use crate::types::{
    LanguageId,
    Translations,
};

/// Backing storage for the languages of a translation set.
///
/// The editor only talks to storage through this trait, so the model can be
/// exercised without a filesystem.
pub trait LanguageStore: Debug + Send + Sync {
    /// Read the mapping of one language.
    ///
    /// # Errors
    /// `StoreError::NotFound` if the language has no backing data, or a read
    /// or decode error.
    fn load(&self, language: &LanguageId) -> Result<Translations, StoreError>;

    /// Replace the stored mapping of one language.
    ///
    /// # Errors
    /// `StoreError::Write` or `StoreError::Encode` on failure.
    fn save(&self, language: &LanguageId, translations: &Translations) -> Result<(), StoreError>;

    /// Delete the backing data of one language. Missing data is not an error.
    ///
    /// # Errors
    /// Any failure other than the data already being absent.
    fn remove(&self, language: &LanguageId) -> Result<(), StoreError>;

    /// Enumerate the languages available in the store, sorted.
    ///
    /// # Errors
    /// `StoreError::Scan` if the store cannot be enumerated.
    fn list(&self) -> Result<Vec<LanguageId>, StoreError>;

    /// Check that `language` can name backing data before it is created.
    ///
    /// # Errors
    /// `StoreError::InvalidLanguageId` if the id is not a usable file name.
    fn validate(&self, language: &LanguageId) -> Result<(), StoreError> {
        check_file_name(language)
    }
}

/// Accept only a single visible file name.
///
/// Hidden names are refused: discovery skips them, and the workspace
/// settings file lives among them.
///
/// # Errors
/// `StoreError::InvalidLanguageId` for anything else.
pub fn check_file_name(language: &LanguageId) -> Result<(), StoreError> {
    let name = language.as_str();
    let mut components = Path::new(name).components();
    let single = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));

    if single && !name.starts_with('.') && !name.contains('\\') {
        Ok(())
    } else {
        Err(StoreError::InvalidLanguageId(name.to_string()))
    }
}

/// One JSON file per language inside a single directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding the language files
    root: PathBuf,
    /// Selects language files during discovery
    file_matcher: GlobMatcher,
}

impl JsonFileStore {
    /// Create a store over `root` discovering files that match `file_pattern`.
    ///
    /// # Errors
    /// Returns `StoreError::Scan` if `file_pattern` is not a valid glob.
    pub fn new(root: impl Into<PathBuf>, file_pattern: &str) -> Result<Self, StoreError> {
        let file_matcher = discovery::compile_file_pattern(file_pattern)?;
        Ok(Self { root: root.into(), file_matcher })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `language`.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidLanguageId` unless [`check_file_name`]
    /// accepts the id.
    pub fn path_for(&self, language: &LanguageId) -> Result<PathBuf, StoreError> {
        check_file_name(language)?;
        Ok(self.root.join(language.as_str()))
    }
}

impl LanguageStore for JsonFileStore {
    fn load(&self, language: &LanguageId) -> Result<Translations, StoreError> {
        let path = self.path_for(language)?;
        tracing::debug!(path = %path.display(), "Loading language file");

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path });
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        json::parse_translations(&content).map_err(|source| StoreError::Decode { path, source })
    }

    fn save(&self, language: &LanguageId, translations: &Translations) -> Result<(), StoreError> {
        let path = self.path_for(language)?;
        let text = match json::render_translations(translations) {
            Ok(text) => text,
            Err(source) => return Err(StoreError::Encode { path, source }),
        };

        std::fs::write(&path, text).map_err(|source| StoreError::Write { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "Saved language file");

        Ok(())
    }

    fn remove(&self, language: &LanguageId) -> Result<(), StoreError> {
        let path = self.path_for(language)?;

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed language file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Language file already absent");
                Ok(())
            }
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    fn list(&self) -> Result<Vec<LanguageId>, StoreError> {
        discovery::find_language_files(&self.root, &self.file_matcher)
    }
}

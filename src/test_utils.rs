//! Shared helpers for unit tests.
#![cfg(test)]

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::sync::{
    Arc,
    Mutex,
};

use crate::model::{
    LanguageValues,
    TranslationSet,
};
use crate::store::{
    LanguageStore,
    StoreError,
};
use crate::types::{
    LanguageId,
    Translations,
};

/// Build a `Translations` map from key/value pairs.
pub(crate) fn translations(entries: &[(&str, &str)]) -> Translations {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Build a translation set from `(language, entries)` pairs.
pub(crate) fn translation_set(languages: &[(&str, &[(&str, &str)])]) -> TranslationSet {
    languages
        .iter()
        .map(|(language, entries)| (LanguageId::from(*language), translations(entries)))
        .collect()
}

/// Build per-language values for `add_key` / `rename_key`.
pub(crate) fn language_values(values: &[(&str, &str)]) -> LanguageValues {
    values
        .iter()
        .map(|(language, value)| (LanguageId::from(*language), (*value).to_string()))
        .collect()
}

/// In-memory `LanguageStore` whose contents can be inspected from the test.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    /// Stored mappings, shared between clones
    files: Arc<Mutex<BTreeMap<LanguageId, Translations>>>,
    /// Languages whose `save` fails
    failing: Arc<Mutex<BTreeSet<LanguageId>>>,
}

impl MemoryStore {
    pub(crate) fn with_files(languages: &[(&str, &[(&str, &str)])]) -> Self {
        let store = Self::default();
        if let Ok(mut files) = store.files.lock() {
            for (language, entries) in languages {
                files.insert(LanguageId::from(*language), translations(entries));
            }
        }
        store
    }

    /// Make every later `save` of `language` fail.
    pub(crate) fn fail_saves_of(&self, language: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(LanguageId::from(language));
        }
    }

    pub(crate) fn file(&self, language: &str) -> Option<Translations> {
        self.files.lock().ok()?.get(language).cloned()
    }
}

impl LanguageStore for MemoryStore {
    fn load(&self, language: &LanguageId) -> Result<Translations, StoreError> {
        self.file(language.as_str())
            .ok_or_else(|| StoreError::NotFound { path: language.as_str().into() })
    }

    fn save(&self, language: &LanguageId, translations: &Translations) -> Result<(), StoreError> {
        let failing = self.failing.lock().is_ok_and(|failing| failing.contains(language));
        if failing {
            return Err(StoreError::Write {
                path: language.as_str().into(),
                source: std::io::Error::other("disk full"),
            });
        }

        let compacted: Translations = translations
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Ok(mut files) = self.files.lock() {
            files.insert(language.clone(), compacted);
        }
        Ok(())
    }

    fn remove(&self, language: &LanguageId) -> Result<(), StoreError> {
        if let Ok(mut files) = self.files.lock() {
            files.remove(language);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<LanguageId>, StoreError> {
        Ok(self.files.lock().map(|files| files.keys().cloned().collect()).unwrap_or_default())
    }
}

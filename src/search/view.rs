//! Filtered projection of a translation set.

use std::cmp::Ordering;

use serde::Serialize;

use super::SearchQuery;
use crate::model::TranslationSet;
use crate::types::{
    CompletionStatus,
    LanguageId,
    Translations,
};

/// One key of the filtered view with its value in every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    pub key: String,
    /// Values in column order. `None` where the language lacks the key.
    pub values: Vec<Option<String>>,
    /// Status over the full translation set.
    pub status: CompletionStatus,
}

/// Keys of a translation set that pass a search query.
///
/// Derived data: recompute it whenever the set or the query changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    /// Column order, same as the translation set
    languages: Vec<LanguageId>,
    /// Rows sorted with [`compare_keys`]
    rows: Vec<ViewRow>,
}

impl FilteredView {
    /// Apply `query` to every key of `set`.
    ///
    /// Does not modify `set`; the same inputs always give an equal view.
    #[must_use]
    pub fn compute(set: &TranslationSet, query: &SearchQuery) -> Self {
        let languages: Vec<LanguageId> = set.language_ids().cloned().collect();

        let mut rows: Vec<ViewRow> = set
            .key_universe()
            .into_iter()
            .filter(|key| {
                let values = set.iter().filter_map(|(_, translations)| translations.get(*key));
                query.matches(key, values.map(String::as_str))
            })
            .map(|key| ViewRow {
                key: key.to_string(),
                values: languages
                    .iter()
                    .map(|language| set.value(language.as_str(), key).map(str::to_string))
                    .collect(),
                status: set.completion_status(key),
            })
            .collect();

        rows.sort_by(|a, b| compare_keys(&a.key, &b.key));

        tracing::debug!(
            query = %query.text(),
            retained = rows.len(),
            "Computed filtered view"
        );

        Self { languages, rows }
    }

    #[must_use]
    pub fn languages(&self) -> &[LanguageId] {
        &self.languages
    }

    #[must_use]
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Retained keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    #[must_use]
    pub fn row(&self, key: &str) -> Option<&ViewRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.row(key).is_some()
    }

    /// First key, in display order, starting with `prefix` ignoring case.
    #[must_use]
    pub fn first_key_with_prefix(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        let prefix = prefix.to_lowercase();
        self.keys().find(|key| key.to_lowercase().starts_with(&prefix))
    }

    /// Rebuild the sub-projection of the translation set restricted to the
    /// retained keys.
    #[must_use]
    pub fn to_translation_set(&self) -> TranslationSet {
        self.languages
            .iter()
            .enumerate()
            .map(|(column, language)| {
                let translations: Translations = self
                    .rows
                    .iter()
                    .filter_map(|row| {
                        let value = row.values.get(column)?.as_ref()?;
                        Some((row.key.clone(), value.clone()))
                    })
                    .collect();
                (language.clone(), translations)
            })
            .collect()
    }
}

/// Display order of keys: case-insensitive, then case-sensitive for ties.
#[must_use]
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

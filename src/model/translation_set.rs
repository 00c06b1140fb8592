//! The in-memory translation set.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde::Serialize;

use super::ModelError;
use crate::types::{
    CompletionStatus,
    LanguageId,
    Translations,
};

/// Values supplied per language when adding or editing a key.
pub type LanguageValues = BTreeMap<LanguageId, String>;

/// Language id to key/value mapping for every loaded language.
///
/// Languages are kept in ascending id order, which is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationSet {
    languages: BTreeMap<LanguageId, Translations>,
}

/// Number of keys in each completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub complete: usize,
    pub partial: usize,
    pub missing: usize,
}

impl TranslationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language_ids(&self) -> impl Iterator<Item = &LanguageId> {
        self.languages.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageId, &Translations)> {
        self.languages.iter()
    }

    #[must_use]
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    #[must_use]
    pub fn translations(&self, language: &str) -> Option<&Translations> {
        self.languages.get(language)
    }

    #[must_use]
    pub fn value(&self, language: &str, key: &str) -> Option<&str> {
        self.languages.get(language)?.get(key).map(String::as_str)
    }

    /// Insert or replace the whole mapping of a language.
    ///
    /// Used when loading from storage; returns the previous mapping if any.
    pub fn set_language(
        &mut self,
        language: LanguageId,
        translations: Translations,
    ) -> Option<Translations> {
        self.languages.insert(language, translations)
    }

    /// Union of the keys of every language, sorted case-sensitively.
    #[must_use]
    pub fn key_universe(&self) -> BTreeSet<&str> {
        self.languages
            .values()
            .flat_map(|translations| translations.keys())
            .map(String::as_str)
            .collect()
    }

    /// Whether `key` exists in at least one language.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.languages.values().any(|translations| translations.contains_key(key))
    }

    /// Add an empty language.
    ///
    /// # Errors
    /// `EmptyLanguageId` for a blank id, `DuplicateLanguage` if it already exists.
    pub fn add_language(&mut self, language: LanguageId) -> Result<(), ModelError> {
        if language.as_str().trim().is_empty() {
            return Err(ModelError::EmptyLanguageId);
        }
        if self.languages.contains_key(&language) {
            return Err(ModelError::DuplicateLanguage(language));
        }

        self.languages.insert(language, Translations::new());
        Ok(())
    }

    /// Remove a language and return its mapping.
    ///
    /// # Errors
    /// `LanguageNotFound` if the language is not loaded.
    pub fn remove_language(&mut self, language: &LanguageId) -> Result<Translations, ModelError> {
        self.languages
            .remove(language)
            .ok_or_else(|| ModelError::LanguageNotFound(language.clone()))
    }

    /// Add `key` to every language.
    ///
    /// Each language gets its value from `values`, or an empty string when
    /// none is supplied. Values for languages that are not loaded are ignored.
    ///
    /// # Errors
    /// `EmptyKey` for a blank key, `DuplicateKey` if any language already has it.
    pub fn add_key(&mut self, key: &str, values: &LanguageValues) -> Result<(), ModelError> {
        if key.trim().is_empty() {
            return Err(ModelError::EmptyKey);
        }
        if self.contains_key(key) {
            return Err(ModelError::DuplicateKey(key.to_string()));
        }

        log_unknown_languages(self, values);

        for (language, translations) in &mut self.languages {
            let value = values.get(language).cloned().unwrap_or_default();
            translations.insert(key.to_string(), value);
        }
        Ok(())
    }

    /// Rename `old_key` to `new_key` and apply new values.
    ///
    /// The value of `old_key` moves to `new_key` in every language that has
    /// it. Then, for each language in `values`, a non-empty value is stored
    /// under `new_key` and an empty one removes it. Languages missing from
    /// `values` keep the moved value. When both keys are equal only the
    /// values are applied.
    ///
    /// # Errors
    /// `EmptyKey` for a blank `new_key`. `DuplicateKey` if the keys differ and
    /// `new_key` already exists in any language, since the move would
    /// overwrite it.
    pub fn rename_key(
        &mut self,
        old_key: &str,
        new_key: &str,
        values: &LanguageValues,
    ) -> Result<(), ModelError> {
        if new_key.trim().is_empty() {
            return Err(ModelError::EmptyKey);
        }

        if old_key != new_key {
            if self.contains_key(new_key) {
                return Err(ModelError::DuplicateKey(new_key.to_string()));
            }
            for translations in self.languages.values_mut() {
                if let Some(value) = translations.remove(old_key) {
                    translations.insert(new_key.to_string(), value);
                }
            }
        }

        log_unknown_languages(self, values);

        for (language, value) in values {
            let Some(translations) = self.languages.get_mut(language) else {
                continue;
            };
            if value.is_empty() {
                translations.remove(new_key);
            } else {
                translations.insert(new_key.to_string(), value.clone());
            }
        }
        Ok(())
    }

    /// Remove `key` from every language.
    ///
    /// Returns how many languages held the key; absence is not an error.
    pub fn delete_key(&mut self, key: &str) -> usize {
        self.languages
            .values_mut()
            .filter_map(|translations| translations.remove(key))
            .count()
    }

    /// Completeness of `key` across all loaded languages.
    #[must_use]
    pub fn completion_status(&self, key: &str) -> CompletionStatus {
        let missing = self
            .languages
            .values()
            .filter(|translations| translations.get(key).is_none_or(String::is_empty))
            .count();
        CompletionStatus::from_missing_count(missing, self.languages.len())
    }

    /// Completion counts over the whole key universe.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for key in self.key_universe() {
            match self.completion_status(key) {
                CompletionStatus::Complete => counts.complete += 1,
                CompletionStatus::Partial => counts.partial += 1,
                CompletionStatus::Missing => counts.missing += 1,
            }
        }
        counts
    }
}

impl FromIterator<(LanguageId, Translations)> for TranslationSet {
    fn from_iter<I: IntoIterator<Item = (LanguageId, Translations)>>(iter: I) -> Self {
        Self { languages: iter.into_iter().collect() }
    }
}

/// Values addressed to languages that are not loaded are dropped.
fn log_unknown_languages(set: &TranslationSet, values: &LanguageValues) {
    for language in values.keys().filter(|language| !set.languages.contains_key(*language)) {
        tracing::debug!(language = %language, "Ignoring value for unknown language");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::{
        language_values,
        translation_set,
    };

    /// `en.json = {"hello":"Hi"}`, `fr.json = {"hello":"Salut","bye":"Au revoir"}`
    #[fixture]
    fn en_fr() -> TranslationSet {
        translation_set(&[
            ("en.json", &[("hello", "Hi")]),
            ("fr.json", &[("hello", "Salut"), ("bye", "Au revoir")]),
        ])
    }

    #[rstest]
    fn key_universe_is_union_of_languages(en_fr: TranslationSet) {
        let keys: Vec<&str> = en_fr.key_universe().into_iter().collect();

        assert_eq!(keys, vec!["bye", "hello"]);
    }

    #[rstest]
    #[case::complete("hello", CompletionStatus::Complete)]
    #[case::partial("bye", CompletionStatus::Partial)]
    #[case::missing("unknown", CompletionStatus::Missing)]
    fn completion_status_scenario(
        en_fr: TranslationSet,
        #[case] key: &str,
        #[case] expected: CompletionStatus,
    ) {
        assert_that!(en_fr.completion_status(key), eq(expected));
    }

    #[rstest]
    fn empty_value_counts_as_missing() {
        let set = translation_set(&[("en.json", &[("a", "")]), ("fr.json", &[("a", "A")])]);

        assert_that!(set.completion_status("a"), eq(CompletionStatus::Partial));
    }

    #[rstest]
    fn add_language_twice_is_rejected() {
        let mut set = TranslationSet::new();

        assert_that!(set.add_language(LanguageId::from("de.json")), ok(anything()));
        let result = set.add_language(LanguageId::from("de.json"));

        assert_eq!(result, Err(ModelError::DuplicateLanguage(LanguageId::from("de.json"))));
        assert_that!(set.language_count(), eq(1));
    }

    #[rstest]
    fn add_language_rejects_blank_id() {
        let mut set = TranslationSet::new();

        assert_eq!(set.add_language(LanguageId::from("  ")), Err(ModelError::EmptyLanguageId));
        assert_that!(set.is_empty(), eq(true));
    }

    #[rstest]
    fn added_language_starts_empty(mut en_fr: TranslationSet) {
        en_fr.add_language(LanguageId::from("de.json")).unwrap();

        assert_that!(en_fr.translations("de.json").map(Translations::len), some(eq(0)));
        assert_that!(en_fr.completion_status("hello"), eq(CompletionStatus::Partial));
    }

    #[rstest]
    fn remove_language_returns_mapping(mut en_fr: TranslationSet) {
        let removed = en_fr.remove_language(&LanguageId::from("fr.json")).unwrap();

        assert_that!(removed.len(), eq(2));
        assert_that!(en_fr.contains_language("fr.json"), eq(false));
        assert_that!(en_fr.contains_key("bye"), eq(false));
    }

    #[rstest]
    fn remove_unknown_language_is_not_found(mut en_fr: TranslationSet) {
        let before = en_fr.clone();

        let result = en_fr.remove_language(&LanguageId::from("de.json"));

        assert_eq!(result, Err(ModelError::LanguageNotFound(LanguageId::from("de.json"))));
        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn add_key_sets_every_language(mut en_fr: TranslationSet) {
        en_fr.add_key("title", &language_values(&[("fr.json", "Titre")])).unwrap();

        assert_that!(en_fr.value("fr.json", "title"), some(eq("Titre")));
        assert_that!(en_fr.value("en.json", "title"), some(eq("")));
        assert_that!(en_fr.completion_status("title"), eq(CompletionStatus::Partial));
    }

    #[rstest]
    #[case::all(&[("en.json", "Title"), ("fr.json", "Titre")], CompletionStatus::Complete)]
    #[case::some(&[("en.json", "Title")], CompletionStatus::Partial)]
    #[case::blank(&[("en.json", ""), ("fr.json", "")], CompletionStatus::Missing)]
    #[case::none(&[], CompletionStatus::Missing)]
    fn add_key_status_reflects_supplied_values(
        mut en_fr: TranslationSet,
        #[case] values: &[(&str, &str)],
        #[case] expected: CompletionStatus,
    ) {
        en_fr.add_key("title", &language_values(values)).unwrap();

        assert_that!(en_fr.completion_status("title"), eq(expected));
    }

    #[rstest]
    fn add_key_existing_in_any_language_is_rejected(mut en_fr: TranslationSet) {
        let before = en_fr.clone();

        let result = en_fr.add_key("bye", &language_values(&[("en.json", "Bye")]));

        assert_eq!(result, Err(ModelError::DuplicateKey("bye".to_string())));
        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn add_key_rejects_blank_key(mut en_fr: TranslationSet) {
        assert_eq!(en_fr.add_key(" ", &LanguageValues::new()), Err(ModelError::EmptyKey));
    }

    #[rstest]
    fn add_key_ignores_unknown_languages(mut en_fr: TranslationSet) {
        en_fr.add_key("title", &language_values(&[("xx.json", "?")])).unwrap();

        assert_that!(en_fr.contains_language("xx.json"), eq(false));
        assert_that!(en_fr.completion_status("title"), eq(CompletionStatus::Missing));
    }

    #[rstest]
    fn rename_moves_values_in_every_language(mut en_fr: TranslationSet) {
        en_fr.rename_key("hello", "greeting", &LanguageValues::new()).unwrap();

        assert_that!(en_fr.contains_key("hello"), eq(false));
        assert_that!(en_fr.value("en.json", "greeting"), some(eq("Hi")));
        assert_that!(en_fr.value("fr.json", "greeting"), some(eq("Salut")));
    }

    #[rstest]
    fn rename_applies_values_and_removes_empty(mut en_fr: TranslationSet) {
        let values = language_values(&[("en.json", "Hello"), ("fr.json", "")]);

        en_fr.rename_key("hello", "greeting", &values).unwrap();

        assert_that!(en_fr.value("en.json", "greeting"), some(eq("Hello")));
        assert_that!(en_fr.value("fr.json", "greeting"), none());
    }

    #[rstest]
    fn rename_only_touches_languages_holding_old_key(mut en_fr: TranslationSet) {
        en_fr.rename_key("bye", "farewell", &LanguageValues::new()).unwrap();

        assert_that!(en_fr.value("en.json", "farewell"), none());
        assert_that!(en_fr.value("fr.json", "farewell"), some(eq("Au revoir")));
    }

    #[rstest]
    fn rename_to_self_with_current_values_is_noop(mut en_fr: TranslationSet) {
        let before = en_fr.clone();
        let values = language_values(&[("en.json", "Hi"), ("fr.json", "Salut")]);

        en_fr.rename_key("hello", "hello", &values).unwrap();

        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn rename_to_self_updates_values(mut en_fr: TranslationSet) {
        en_fr.rename_key("bye", "bye", &language_values(&[("en.json", "Bye")])).unwrap();

        assert_that!(en_fr.completion_status("bye"), eq(CompletionStatus::Complete));
    }

    #[rstest]
    fn rename_onto_existing_key_is_rejected(mut en_fr: TranslationSet) {
        let before = en_fr.clone();

        let result = en_fr.rename_key("bye", "hello", &LanguageValues::new());

        assert_eq!(result, Err(ModelError::DuplicateKey("hello".to_string())));
        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn rename_to_blank_key_is_rejected(mut en_fr: TranslationSet) {
        let before = en_fr.clone();

        assert_eq!(en_fr.rename_key("hello", "", &LanguageValues::new()), Err(ModelError::EmptyKey));
        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn delete_key_removes_everywhere(mut en_fr: TranslationSet) {
        assert_that!(en_fr.delete_key("hello"), eq(2));

        assert_that!(en_fr.contains_key("hello"), eq(false));
        assert_that!(en_fr.key_universe().len(), eq(1));
    }

    #[rstest]
    fn delete_missing_key_changes_nothing(mut en_fr: TranslationSet) {
        let before = en_fr.clone();

        assert_that!(en_fr.delete_key("nope"), eq(0));
        assert_eq!(en_fr, before);
    }

    #[rstest]
    fn delete_on_empty_set_is_fine() {
        let mut set = TranslationSet::new();

        assert_that!(set.delete_key("anything"), eq(0));
    }

    #[rstest]
    fn status_counts_cover_universe(mut en_fr: TranslationSet) {
        en_fr.add_key("empty", &LanguageValues::new()).unwrap();

        let counts = en_fr.status_counts();

        assert_eq!(counts, StatusCounts { complete: 1, partial: 1, missing: 1 });
    }
}

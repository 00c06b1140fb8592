//! Translation editing engine.
//!
//! [`Editor`] owns one translation set together with its storage, the active
//! search query and the filtered view derived from both. Every mutation goes
//! through it so that the view, persistence and subscribers stay in step.
/// Editor error types
mod error;
pub mod event;

pub use error::{
    EditorError,
    LanguageFailure,
    SaveError,
};
pub use event::EditorEvent;

use crate::model::{
    LanguageValues,
    ModelError,
    TranslationSet,
};
use crate::search::{
    FilteredView,
    SearchQuery,
    Stats,
};
use crate::store::LanguageStore;
use crate::types::{
    CompletionStatus,
    LanguageId,
    Translations,
};

/// Callback invoked after every change.
pub type Listener = Box<dyn Fn(&EditorEvent) + Send + Sync>;

/// Behaviour switches of an [`Editor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Save every language after each successful mutation
    pub auto_save: bool,
    /// Appended to language names that lack it, e.g. `.json`
    pub language_suffix: String,
    /// Initial search flags
    pub match_keys: bool,
    pub match_values: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            auto_save: true,
            language_suffix: ".json".to_string(),
            match_keys: true,
            match_values: true,
        }
    }
}

/// Outcome of loading a list of languages.
///
/// Languages that failed to load are present in the set with an empty
/// mapping; their errors are listed in `failures`.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LanguageId>,
    pub failures: Vec<LanguageFailure>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The editing engine.
pub struct Editor {
    store: Box<dyn LanguageStore>,
    translations: TranslationSet,
    query: SearchQuery,
    /// Always derived from `translations` and `query`
    view: FilteredView,
    options: EditorOptions,
    listeners: Vec<Listener>,
    /// Set by a mutation that storage has not seen yet
    unsaved: bool,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("store", &self.store)
            .field("translations", &self.translations)
            .field("query", &self.query)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .field("unsaved", &self.unsaved)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Create an editor with an empty translation set.
    #[must_use]
    pub fn new(store: impl LanguageStore + 'static, options: EditorOptions) -> Self {
        let query = SearchQuery::new("", options.match_keys, options.match_values);
        Self {
            store: Box::new(store),
            translations: TranslationSet::new(),
            query,
            view: FilteredView::default(),
            options,
            listeners: Vec::new(),
            unsaved: false,
        }
    }

    /// Register a listener called after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&EditorEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub const fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    #[must_use]
    pub const fn view(&self) -> &FilteredView {
        &self.view
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub const fn auto_save(&self) -> bool {
        self.options.auto_save
    }

    /// Whether a mutation since the last load or save is still unwritten.
    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub const fn set_auto_save(&mut self, enabled: bool) {
        self.options.auto_save = enabled;
    }

    /// Replace options that can change while running.
    ///
    /// Search flags are only an initial value and are left as they are.
    pub fn apply_options(&mut self, options: EditorOptions) {
        self.options.auto_save = options.auto_save;
        self.options.language_suffix = options.language_suffix;
    }

    #[must_use]
    pub fn completion_status(&self, key: &str) -> CompletionStatus {
        self.translations.completion_status(key)
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::collect(&self.translations, &self.view, &self.query)
    }

    /// Load the given languages, replacing the current set.
    ///
    /// A language that cannot be read starts empty and is reported in the
    /// returned [`LoadReport`]; the others load normally.
    pub fn load(&mut self, languages: &[LanguageId]) -> LoadReport {
        let mut translations = TranslationSet::new();
        let mut report = LoadReport::default();

        for language in languages {
            match self.store.load(language) {
                Ok(loaded) => {
                    translations.set_language(language.clone(), loaded);
                    report.loaded.push(language.clone());
                }
                Err(error) => {
                    tracing::warn!(language = %language, %error, "Failed to load language");
                    translations.set_language(language.clone(), Translations::new());
                    report.failures.push(LanguageFailure { language: language.clone(), error });
                }
            }
        }

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Loaded translation set"
        );

        self.translations = translations;
        self.unsaved = false;
        self.refresh(&EditorEvent::Loaded {
            languages: self.translations.language_count(),
            failures: report.failures.len(),
        });
        report
    }

    /// Load every language the store can enumerate.
    ///
    /// # Errors
    /// Returns the store error if enumeration fails; nothing is changed then.
    pub fn load_all(&mut self) -> Result<LoadReport, EditorError> {
        let languages = self.store.list()?;
        Ok(self.load(&languages))
    }

    /// Discard in-memory changes and load again from storage.
    ///
    /// # Errors
    /// See [`Editor::load_all`].
    pub fn reload(&mut self) -> Result<LoadReport, EditorError> {
        self.load_all()
    }

    /// Write every language to storage.
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    /// A [`SaveError`] listing every file that failed. The other files are
    /// still written.
    pub fn save(&mut self) -> Result<usize, SaveError> {
        let saved = self.persist_all()?;
        self.unsaved = false;
        self.notify(&EditorEvent::Saved { files: saved });
        Ok(saved)
    }

    /// Replace the search query and recompute the view.
    pub fn set_query(&mut self, text: &str, match_keys: bool, match_values: bool) {
        self.query.set(text, match_keys, match_values);
        let event = EditorEvent::QueryChanged {
            query: self.query.text().to_string(),
            match_keys,
            match_values,
        };
        self.refresh(&event);
    }

    /// Add an empty language.
    ///
    /// `name` is trimmed and gets the configured suffix appended when
    /// missing, so `fr` becomes `fr.json`. Returns the resulting id.
    ///
    /// # Errors
    /// - `Model`: blank name or duplicate language, nothing changed
    /// - `Store`: the store refuses the name, e.g. a path or a hidden file,
    ///   nothing changed
    /// - `AutoSave`: the language was added but saving failed
    pub fn add_language(&mut self, name: &str) -> Result<LanguageId, EditorError> {
        let language = self.normalize_language(name);
        if language.as_str().is_empty() {
            return Err(ModelError::EmptyLanguageId.into());
        }
        self.store.validate(&language)?;

        self.translations.add_language(language.clone())?;
        tracing::info!(language = %language, "Added language");

        self.after_mutation(&EditorEvent::LanguageAdded { language: language.clone() })?;
        Ok(language)
    }

    /// Remove a language and delete its backing file.
    ///
    /// `name` is matched exactly first, then with the suffix appended.
    ///
    /// # Errors
    /// - `Model`: the language is not loaded, nothing changed
    /// - `Store`: the language was removed but its file could not be deleted
    pub fn remove_language(&mut self, name: &str) -> Result<LanguageId, EditorError> {
        let language = if self.translations.contains_language(name) {
            LanguageId::from(name)
        } else {
            self.normalize_language(name)
        };

        self.translations.remove_language(&language)?;
        tracing::info!(language = %language, "Removed language");
        self.refresh(&EditorEvent::LanguageRemoved { language: language.clone() });

        self.store.remove(&language)?;
        Ok(language)
    }

    /// Add a key to every language.
    ///
    /// The key and the values are trimmed first.
    ///
    /// # Errors
    /// - `Model`: blank or already existing key, nothing changed
    /// - `AutoSave`: the key was added but saving failed
    pub fn add_key(&mut self, key: &str, values: &LanguageValues) -> Result<(), EditorError> {
        let key = key.trim();
        self.translations.add_key(key, &trim_values(values))?;
        tracing::debug!(key, "Added key");

        self.after_mutation(&EditorEvent::KeyAdded { key: key.to_string() })
    }

    /// Rename a key and apply new values. See [`TranslationSet::rename_key`].
    ///
    /// The new key and the values are trimmed first.
    ///
    /// # Errors
    /// - `Model`: blank new key or collision with another key, nothing changed
    /// - `AutoSave`: the change was applied but saving failed
    pub fn rename_key(
        &mut self,
        old_key: &str,
        new_key: &str,
        values: &LanguageValues,
    ) -> Result<(), EditorError> {
        let new_key = new_key.trim();
        self.translations.rename_key(old_key, new_key, &trim_values(values))?;
        tracing::debug!(old_key, new_key, "Renamed key");

        self.after_mutation(&EditorEvent::KeyRenamed {
            old_key: old_key.to_string(),
            new_key: new_key.to_string(),
        })
    }

    /// Remove a key from every language. Unknown keys are not an error.
    ///
    /// Returns how many languages held the key.
    ///
    /// # Errors
    /// `AutoSave` if saving after the deletion failed.
    pub fn delete_key(&mut self, key: &str) -> Result<usize, EditorError> {
        let removed = self.translations.delete_key(key);
        tracing::debug!(key, removed, "Deleted key");

        self.after_mutation(&EditorEvent::KeyDeleted { key: key.to_string() })?;
        Ok(removed)
    }

    /// Auto-save, recompute the view and notify listeners.
    fn after_mutation(&mut self, event: &EditorEvent) -> Result<(), EditorError> {
        let saved = self.options.auto_save.then(|| self.persist_all());
        self.unsaved = !matches!(saved, Some(Ok(_)));
        self.refresh(event);

        match saved {
            Some(Err(error)) => Err(EditorError::AutoSave(error)),
            _ => Ok(()),
        }
    }

    fn refresh(&mut self, event: &EditorEvent) {
        self.view = FilteredView::compute(&self.translations, &self.query);
        self.notify(event);
    }

    fn notify(&self, event: &EditorEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    /// Save every language, collecting failures instead of stopping.
    fn persist_all(&self) -> Result<usize, SaveError> {
        let mut saved = 0;
        let mut failures = Vec::new();

        for (language, translations) in self.translations.iter() {
            match self.store.save(language, translations) {
                Ok(()) => saved += 1,
                Err(error) => {
                    tracing::warn!(language = %language, %error, "Failed to save language");
                    failures.push(LanguageFailure { language: language.clone(), error });
                }
            }
        }

        if failures.is_empty() {
            tracing::debug!(saved, "Saved all languages");
            Ok(saved)
        } else {
            Err(SaveError { saved, failures })
        }
    }

    fn normalize_language(&self, name: &str) -> LanguageId {
        let name = name.trim();
        let suffix = self.options.language_suffix.as_str();
        if name.is_empty() || suffix.is_empty() || name.ends_with(suffix) {
            LanguageId::from(name)
        } else {
            LanguageId::from(format!("{name}{suffix}"))
        }
    }
}

fn trim_values(values: &LanguageValues) -> LanguageValues {
    values.iter().map(|(language, value)| (language.clone(), value.trim().to_string())).collect()
}

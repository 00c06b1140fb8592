use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::editor::EditorOptions;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.i18n-editor.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub translation_files: TranslationFilesConfig,

    /// Appended to new language names that lack it
    pub language_suffix: String,

    /// Save all files after every edit
    pub auto_save: bool,

    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Matched against file names directly inside the workspace root.
    pub file_pattern: String,
}

/// Initial search flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub match_keys: bool,
    pub match_values: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { match_keys: true, match_values: true }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "*.json".to_string() }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            language_suffix: ".json".to_string(),
            auto_save: true,
            search: SearchConfig::default(),
        }
    }
}

impl EditorSettings {
    /// # Errors
    /// - Empty or invalid file pattern
    /// - File pattern spanning directories
    /// - Empty language suffix, or one containing a path separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let pattern = &self.translation_files.file_pattern;
        if pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        } else if pattern.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!(
                    "Pattern '{pattern}' must match file names in the workspace root, not paths"
                ),
            ));
        }

        if self.language_suffix.is_empty() {
            errors.push(ValidationError::new(
                "languageSuffix",
                "The suffix cannot be empty. Example: \".json\"",
            ));
        } else if self.language_suffix.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "languageSuffix",
                format!("Suffix '{}' cannot contain a path separator", self.language_suffix),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Options for an [`crate::editor::Editor`] built from these settings.
    #[must_use]
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            auto_save: self.auto_save,
            language_suffix: self.language_suffix.clone(),
            match_keys: self.search.match_keys,
            match_values: self.search.match_values,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = EditorSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"autoSave": false, "search": {"matchValues": false}}"#;

        let settings: EditorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.auto_save, eq(false));
        assert_that!(settings.search.match_keys, eq(true));
        assert_that!(settings.search.match_values, eq(false));
        assert_that!(settings.language_suffix, eq(".json"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: EditorSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings, EditorSettings::default());
        assert_that!(settings.translation_files.file_pattern, eq("*.json"));
    }

    #[rstest]
    fn editor_options_follow_settings() {
        let settings = EditorSettings {
            language_suffix: ".lang.json".to_string(),
            auto_save: false,
            search: SearchConfig { match_keys: false, match_values: true },
            ..EditorSettings::default()
        };

        let options = settings.editor_options();

        assert_that!(options.auto_save, eq(false));
        assert_that!(options.language_suffix, eq(".lang.json"));
        assert_that!(options.match_keys, eq(false));
        assert_that!(options.match_values, eq(true));
    }

    #[rstest]
    fn validate_invalid_translation_file_pattern_empty() {
        let settings = EditorSettings {
            translation_files: TranslationFilesConfig { file_pattern: String::new() },
            ..EditorSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.filePattern")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translation_file_pattern_invalid_glob() {
        let settings = EditorSettings {
            translation_files: TranslationFilesConfig { file_pattern: "*.{json".to_string() },
            ..EditorSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_translation_file_pattern_with_directory() {
        let settings = EditorSettings {
            translation_files: TranslationFilesConfig { file_pattern: "locales/*.json".to_string() },
            ..EditorSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.message, contains_substring("not paths"))])
        );
    }

    #[rstest]
    fn validate_empty_language_suffix() {
        let settings = EditorSettings { language_suffix: String::new(), ..EditorSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languageSuffix")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = EditorSettings {
            translation_files: TranslationFilesConfig { file_pattern: String::new() },
            language_suffix: "/.json".to_string(),
            ..EditorSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. translationFiles.filePattern"));
        assert_that!(error_message, contains_substring("2. languageSuffix"));
        assert_that!(error_message, contains_substring("path separator"));
    }
}

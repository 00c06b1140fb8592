//! Core types used throughout the project.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Key to value mapping of a single language file.
///
/// `BTreeMap` keeps keys in ascending case-sensitive ordinal order, which is
/// also the order they are written to disk.
pub type Translations = BTreeMap<String, String>;

/// Identifier of one language file, e.g. `en.json`.
///
/// Equality and ordering are plain case-sensitive string comparisons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name shown in a column header: the id without `suffix`.
    ///
    /// `en.json` with suffix `.json` becomes `en`.
    #[must_use]
    pub fn display_name(&self, suffix: &str) -> &str {
        if suffix.is_empty() {
            return &self.0;
        }
        self.0.strip_suffix(suffix).filter(|name| !name.is_empty()).unwrap_or(&self.0)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LanguageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-key completeness across all languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionStatus {
    /// Non-empty value in every language.
    Complete,
    /// Non-empty value in some, but not all, languages.
    Partial,
    /// Empty or absent in every language.
    Missing,
}

impl CompletionStatus {
    /// Classifies a key from how many of `language_count` languages lack a value.
    #[must_use]
    pub const fn from_missing_count(missing: usize, language_count: usize) -> Self {
        if missing == 0 {
            Self::Complete
        } else if missing >= language_count {
            Self::Missing
        } else {
            Self::Partial
        }
    }
}

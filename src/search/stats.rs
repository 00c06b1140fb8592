//! Summary figures for a status line.

use std::fmt;

use serde::Serialize;

use super::{
    FilteredView,
    SearchQuery,
};
use crate::model::{
    StatusCounts,
    TranslationSet,
};

/// Counts describing the translation set and the active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub languages: usize,
    pub total_keys: usize,
    pub filtered_keys: usize,
    pub status: StatusCounts,
    /// Folded query text, empty when no search is active
    pub query: String,
}

impl Stats {
    #[must_use]
    pub fn collect(set: &TranslationSet, view: &FilteredView, query: &SearchQuery) -> Self {
        Self {
            languages: set.language_count(),
            total_keys: set.key_universe().len(),
            filtered_keys: view.len(),
            status: set.status_counts(),
            query: query.text().to_string(),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.languages == 0 {
            return f.write_str("No translation files loaded");
        }
        if self.query.is_empty() {
            write!(f, "Languages: {} | Keys: {}", self.languages, self.total_keys)
        } else {
            write!(
                f,
                "Languages: {} | Keys: {}/{} (filtered) | Search: '{}'",
                self.languages, self.filtered_keys, self.total_keys, self.query
            )
        }
    }
}

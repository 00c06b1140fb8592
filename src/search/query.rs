//! Search query state.

use serde::Serialize;

/// Active search text and the fields it is matched against.
///
/// The text is stored case-folded; matching is plain substring containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Lowercased query text
    text: String,
    pub match_keys: bool,
    pub match_values: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self { text: String::new(), match_keys: true, match_values: true }
    }
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: &str, match_keys: bool, match_values: bool) -> Self {
        Self { text: fold(text), match_keys, match_values }
    }

    /// Replace text and flags.
    pub fn set(&mut self, text: &str, match_keys: bool, match_values: bool) {
        self.text = fold(text);
        self.match_keys = match_keys;
        self.match_values = match_values;
    }

    /// The case-folded query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// An empty query keeps every key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether a key with the given values passes the filter.
    pub fn matches<'a>(&self, key: &str, mut values: impl Iterator<Item = &'a str>) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.match_keys && fold(key).contains(&self.text) {
            return true;
        }
        self.match_values && values.any(|value| fold(value).contains(&self.text))
    }
}

/// Case folding used for both query and candidates.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

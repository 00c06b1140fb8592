//! Change notifications emitted by the editor.

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::LanguageId;

/// What changed. Sent to subscribers after the view has been recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorEvent {
    Loaded { languages: usize, failures: usize },
    LanguageAdded { language: LanguageId },
    LanguageRemoved { language: LanguageId },
    KeyAdded { key: String },
    KeyRenamed { old_key: String, new_key: String },
    KeyDeleted { key: String },
    QueryChanged { query: String, match_keys: bool, match_values: bool },
    Saved { files: usize },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn serializes_with_kind_tag() {
        let event = EditorEvent::KeyRenamed { old_key: "a".to_string(), new_key: "b".to_string() };

        let value = serde_json::to_value(&event).unwrap_or_default();

        assert_eq!(value, json!({"kind": "keyRenamed", "oldKey": "a", "newKey": "b"}));
    }
}

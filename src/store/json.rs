//! Flat JSON translation file codec.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::Translations;

/// Indentation used when writing translation files.
const INDENT: &[u8] = b"    ";

/// A comma followed by optional whitespace and a closing brace or bracket.
#[allow(clippy::unwrap_used)]
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Remove trailing commas before `}` and `]`.
///
/// This is a plain text substitution and does not look at string literals, so
/// a value such as `"a, }"` is rewritten as well.
///
/// # Examples
/// ```
/// use i18n_json_editor::store::json::repair_trailing_commas;
///
/// assert_eq!(repair_trailing_commas(r#"{"a": "1",}"#), r#"{"a": "1"}"#);
/// ```
#[must_use]
pub fn repair_trailing_commas(json_text: &str) -> Cow<'_, str> {
    TRAILING_COMMA.replace_all(json_text, "$1")
}

/// Parse the content of a language file into a key to value map.
///
/// The text must be a JSON object whose values are all strings once trailing
/// commas have been removed.
///
/// # Errors
/// Returns the parser error if the repaired text is not a flat string object.
pub fn parse_translations(json_text: &str) -> Result<Translations, serde_json::Error> {
    let repaired = repair_trailing_commas(json_text);
    serde_json::from_str(&repaired)
}

/// Render a key to value map in the on-disk format.
///
/// Empty values are dropped, keys are sorted, output is indented with four
/// spaces and non-ASCII characters are written as-is.
///
/// # Errors
/// Returns the serializer error, which does not happen for string maps in practice.
pub fn render_translations(translations: &Translations) -> Result<String, serde_json::Error> {
    let compacted: BTreeMap<&str, &str> = translations
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    compacted.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::object(r#"{"a": "1",}"#, r#"{"a": "1"}"#)]
    #[case::whitespace("{\"a\": \"1\" ,\n  }", "{\"a\": \"1\" }")]
    #[case::array("[1, 2,\t]", "[1, 2]")]
    #[case::nested(r#"{"a": {"b": "c",},}"#, r#"{"a": {"b": "c"}}"#)]
    #[case::untouched(r#"{"a": "1", "b": "2"}"#, r#"{"a": "1", "b": "2"}"#)]
    #[case::inside_string(r#"{"a": "x, }"}"#, r#"{"a": "x}"}"#)]
    fn test_repair_trailing_commas(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(repair_trailing_commas(input), expected);
    }

    #[googletest::test]
    fn parse_accepts_trailing_comma() {
        let result = parse_translations(r#"{"a": "1",}"#).unwrap();

        expect_that!(result.get("a"), some(eq(&"1".to_string())));
        expect_that!(result.len(), eq(1));
    }

    #[googletest::test]
    fn parse_keeps_empty_and_multiline_values() {
        let result = parse_translations(r#"{"empty": "", "lines": "one\ntwo"}"#).unwrap();

        expect_that!(result.get("empty"), some(eq(&String::new())));
        expect_that!(result.get("lines"), some(eq(&"one\ntwo".to_string())));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::array(r#"["a", "b"]"#)]
    #[case::nested(r#"{"a": {"b": "c"}}"#)]
    #[case::number(r#"{"a": 1}"#)]
    #[case::null("null")]
    #[case::unterminated(r#"{"a": "1""#)]
    fn parse_rejects_non_flat_objects(#[case] input: &str) {
        assert_that!(parse_translations(input).is_err(), eq(true));
    }

    #[rstest]
    fn render_sorts_keys_and_indents_with_four_spaces() {
        let mut translations = Translations::new();
        translations.insert("b".to_string(), "2".to_string());
        translations.insert("B".to_string(), "3".to_string());
        translations.insert("a".to_string(), "1".to_string());

        let text = render_translations(&translations).unwrap();

        assert_eq!(text, "{\n    \"B\": \"3\",\n    \"a\": \"1\",\n    \"b\": \"2\"\n}");
    }

    #[rstest]
    fn render_drops_empty_values() {
        let mut translations = Translations::new();
        translations.insert("kept".to_string(), "value".to_string());
        translations.insert("dropped".to_string(), String::new());

        let text = render_translations(&translations).unwrap();

        assert_eq!(text, "{\n    \"kept\": \"value\"\n}");
    }

    #[rstest]
    fn render_writes_non_ascii_literally() {
        let mut translations = Translations::new();
        translations.insert("hello".to_string(), "こんにちは".to_string());

        let text = render_translations(&translations).unwrap();

        assert_that!(text, contains_substring("\"こんにちは\""));
    }

    #[rstest]
    fn render_of_empty_map_is_empty_object() {
        assert_that!(render_translations(&Translations::new()).unwrap(), eq("{}"));
    }

    #[rstest]
    fn rendered_text_parses_back() {
        let mut translations = Translations::new();
        translations.insert("quote".to_string(), "say \"hi\"".to_string());
        translations.insert("multi".to_string(), "a\nb".to_string());

        let text = render_translations(&translations).unwrap();

        assert_eq!(parse_translations(&text).unwrap(), translations);
    }
}

//! Provider payloads as they arrive on the wire.
//!
//! The dictionary provider abbreviates every key and omits (or nulls) fields
//! freely, so every field here is optional and `null` collapses to the
//! default. Below the top level a value of the wrong type is read as absent
//! too; only a mistyped `BI` or `ML` on a detail document is an error.
//! Nothing in this module interprets the data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

fn read_or_skip<T: DeserializeOwned>(value: Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(error = %err, "ignoring mistyped provider field");
            None
        }
    }
}

/// Reads the field as `T`, or the default when it has another type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(read_or_skip(value).unwrap_or_default())
}

/// Like [`lenient`], but ids may also arrive as numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// A list whose mistyped elements are dropped; anything but an array is empty.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().filter_map(read_or_skip).collect())
}

/// A list read position by position: anything but an array is absent and a
/// mistyped element becomes the default, so `[0]` still means the first one.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(by_position(items)))
}

/// Like [`lenient_list`], but the list itself must be an array (or null).
fn positional<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(by_position(items))
}

fn by_position<T: Default + DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .map(|item| read_or_skip(item).unwrap_or_default())
        .collect()
}

/// A single `{ "W": ... }` token; idioms, citations and proverbs are split into these.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawToken {
    #[serde(rename = "I", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "W", default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Home feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawWordItem {
    #[serde(rename = "I", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "W1", default, deserialize_with = "lenient")]
    pub roman: Option<String>,
    #[serde(rename = "W2", default, deserialize_with = "lenient")]
    pub devanagari: Option<String>,
    #[serde(rename = "W3", default, deserialize_with = "lenient")]
    pub urdu: Option<String>,
    #[serde(rename = "WM", default, deserialize_with = "lenient")]
    pub meaning: Option<String>,
    #[serde(rename = "WO", default, deserialize_with = "lenient")]
    pub origin: Option<String>,
    #[serde(rename = "RW", default, deserialize_with = "lenient_items")]
    pub sub_words: Vec<RawToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawHomeSection {
    #[serde(rename = "HT", default, deserialize_with = "lenient")]
    pub header_title: Option<String>,
    #[serde(rename = "R", default, deserialize_with = "lenient_items")]
    pub items: Vec<RawWordItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawHomeBody {
    #[serde(rename = "R", default, deserialize_with = "lenient_items")]
    pub sections: Vec<RawHomeSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawHomeResponse {
    #[serde(rename = "R", default, deserialize_with = "lenient")]
    pub body: Option<RawHomeBody>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSearchItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub word: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meaning: Option<String>,
    #[serde(rename = "lang", default, deserialize_with = "lenient")]
    pub language_tag: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSearchResponse {
    #[serde(rename = "WordList", default, deserialize_with = "lenient_items")]
    pub words: Vec<RawSearchItem>,
}

// ---------------------------------------------------------------------------
// Word detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawBasicInfo {
    #[serde(rename = "I", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "W1", default, deserialize_with = "lenient")]
    pub roman: Option<String>,
    #[serde(rename = "W2", default, deserialize_with = "lenient")]
    pub devanagari: Option<String>,
    #[serde(rename = "W3", default, deserialize_with = "lenient")]
    pub urdu: Option<String>,
    #[serde(rename = "WO", default, deserialize_with = "lenient")]
    pub origin: Option<String>,
    #[serde(rename = "AMF", default, deserialize_with = "lenient")]
    pub audio_url: Option<String>,
    #[serde(rename = "HA", default, deserialize_with = "lenient")]
    pub has_audio: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawDefinition {
    #[serde(rename = "C", default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(rename = "RW", default, deserialize_with = "lenient_items")]
    pub related: Vec<RawToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawMeaningGroup {
    #[serde(rename = "MT", default, deserialize_with = "lenient")]
    pub meaning_type: Option<String>,
    #[serde(rename = "WM", default, deserialize_with = "lenient_list")]
    pub definitions: Option<Vec<RawDefinition>>,
}

/// One idiom or poetic citation: tokens plus the poet/source name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawQuote {
    #[serde(rename = "RW", default, deserialize_with = "lenient_items")]
    pub tokens: Vec<RawToken>,
    #[serde(rename = "PN", default, deserialize_with = "lenient")]
    pub poet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawQuoteList {
    #[serde(rename = "HT", default, deserialize_with = "lenient")]
    pub header_title: Option<String>,
    #[serde(rename = "SW", default, deserialize_with = "lenient")]
    pub search_word: Option<String>,
    #[serde(rename = "R", default, deserialize_with = "lenient_list")]
    pub items: Option<Vec<RawQuote>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawVariantList {
    #[serde(rename = "HT", default, deserialize_with = "lenient")]
    pub header_title: Option<String>,
    #[serde(rename = "R", default, deserialize_with = "lenient_list")]
    pub items: Option<Vec<RawToken>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawMeaningEntry {
    #[serde(rename = "MGL", default, deserialize_with = "lenient_list")]
    pub meaning_groups: Option<Vec<RawMeaningGroup>>,
    #[serde(rename = "IL", default, deserialize_with = "lenient")]
    pub idioms: Option<RawQuoteList>,
    #[serde(rename = "VL", default, deserialize_with = "lenient")]
    pub variants: Option<RawVariantList>,
    #[serde(rename = "SL", default, deserialize_with = "lenient")]
    pub citations: Option<RawQuoteList>,
}

/// One element of `ML`; its position in the list decides its language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawLanguageMeanings {
    #[serde(rename = "R", default, deserialize_with = "lenient_list")]
    pub entries: Option<Vec<RawMeaningEntry>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawRelatedWord {
    Text(String),
    Token(RawToken),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawDetailDocument {
    #[serde(rename = "S", default, deserialize_with = "lenient")]
    pub status: Option<i64>,
    #[serde(rename = "BI", default)]
    pub basic_info: Option<RawBasicInfo>,
    #[serde(rename = "ML", default, deserialize_with = "positional")]
    pub meanings_list: Vec<RawLanguageMeanings>,
    #[serde(rename = "AI", default, deserialize_with = "lenient_items")]
    pub additional_info: Vec<Value>,
    #[serde(rename = "R", default, deserialize_with = "lenient_items")]
    pub related_words: Vec<RawRelatedWord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_collapse_to_defaults() {
        let doc: RawDetailDocument = serde_json::from_value(json!({
            "BI": { "W1": "ishq", "HA": null },
            "ML": null,
            "R": null,
        }))
        .unwrap();
        assert!(doc.meanings_list.is_empty());
        assert!(doc.related_words.is_empty());
        let info = doc.basic_info.unwrap();
        assert_eq!(info.roman.as_deref(), Some("ishq"));
        assert_eq!(info.has_audio, None);
    }

    #[test]
    fn related_words_accept_strings_and_tokens() {
        let doc: RawDetailDocument = serde_json::from_value(json!({
            "R": ["dil", { "I": "42", "W": "jaan" }],
        }))
        .unwrap();
        assert_eq!(
            doc.related_words,
            vec![
                RawRelatedWord::Text("dil".to_string()),
                RawRelatedWord::Token(RawToken {
                    id: Some("42".to_string()),
                    text: Some("jaan".to_string()),
                }),
            ]
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let item: RawWordItem = serde_json::from_value(json!({
            "I": "7",
            "W1": "marja'",
            "X9": [1, 2, 3],
        }))
        .unwrap();
        assert_eq!(item.id.as_deref(), Some("7"));
        assert!(item.sub_words.is_empty());
    }

    #[test]
    fn mistyped_nested_fields_read_as_absent() {
        let doc: RawDetailDocument = serde_json::from_value(json!({
            "BI": { "I": 12, "W1": "ishq", "HA": 1 },
            "ML": [{ "R": [{
                "IL": "",
                "VL": { "R": "ishk" },
                "SL": { "SW": ["ishq"], "R": [{ "RW": [{ "W": 7 }, { "W": "par" }], "PN": 3 }] },
                "MGL": [{ "MT": 4, "WM": [{ "C": "love", "RW": [{ "W": 7 }] }, "loose"] }],
            }] }],
            "R": ["dil", 7, null],
        }))
        .unwrap();
        let info = doc.basic_info.unwrap();
        assert_eq!(info.id.as_deref(), Some("12"));
        assert_eq!(info.has_audio, None);

        let entry = &doc.meanings_list[0].entries.as_ref().unwrap()[0];
        assert_eq!(entry.idioms, None);
        assert_eq!(entry.variants.as_ref().unwrap().items, None);
        let citations = entry.citations.as_ref().unwrap();
        assert_eq!(citations.search_word, None);
        let quote = &citations.items.as_ref().unwrap()[0];
        assert_eq!(quote.tokens[0].text, None);
        assert_eq!(quote.tokens[1].text.as_deref(), Some("par"));
        assert_eq!(quote.poet, None);

        let group = &entry.meaning_groups.as_ref().unwrap()[0];
        assert_eq!(group.meaning_type, None);
        let definitions = group.definitions.as_ref().unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].text.as_deref(), Some("love"));
        assert_eq!(definitions[0].related, vec![RawToken::default()]);
        assert_eq!(definitions[1], RawDefinition::default());

        assert_eq!(doc.related_words, vec![RawRelatedWord::Text("dil".to_string())]);
    }

    #[test]
    fn mistyped_top_level_fields_are_errors() {
        assert!(serde_json::from_value::<RawDetailDocument>(json!({ "BI": "ishq" })).is_err());
        assert!(serde_json::from_value::<RawDetailDocument>(json!({ "ML": {} })).is_err());
        let doc: RawDetailDocument =
            serde_json::from_value(json!({ "ML": ["x", { "R": [] }] })).unwrap();
        assert_eq!(doc.meanings_list.len(), 2);
        assert_eq!(doc.meanings_list[0], RawLanguageMeanings::default());
    }

    #[test]
    fn home_and_search_items_tolerate_mistyped_fields() {
        let home: RawHomeResponse = serde_json::from_value(json!({
            "R": { "R": [
                { "HT": 5, "R": [{ "I": 1, "W1": ["x"], "WM": "asylum", "RW": "nope" }, 9] },
            ] },
        }))
        .unwrap();
        let section = &home.body.unwrap().sections[0];
        assert_eq!(section.header_title, None);
        assert_eq!(section.items.len(), 1);
        assert_eq!(section.items[0].id.as_deref(), Some("1"));
        assert_eq!(section.items[0].roman, None);
        assert_eq!(section.items[0].meaning.as_deref(), Some("asylum"));
        assert!(section.items[0].sub_words.is_empty());

        let search: RawSearchResponse = serde_json::from_value(json!({
            "WordList": [{ "id": 3, "word": "ishq", "meaning": {}, "lang": "ur" }],
        }))
        .unwrap();
        assert_eq!(search.words[0].id.as_deref(), Some("3"));
        assert_eq!(search.words[0].meaning, None);
        assert_eq!(search.words[0].language_tag, None);
    }
}

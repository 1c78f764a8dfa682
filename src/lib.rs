//! Normalization and highlighting for dictionary provider payloads.
//!
//! Raw provider JSON ([`raw`]) goes through the normalizers into canonical
//! records ([`LexicalEntry`], [`ListItem`], [`HomeFeed`]). Citation text is
//! split into emphasized and plain [`Span`]s by [`highlight`]. Everything here
//! is pure: no I/O, no caching, no shared state.

mod access;
pub mod aggregate;
mod entry;
mod error;
mod feed;
pub mod highlight;
mod normalize;
pub mod raw;
mod slot;

#[cfg(feature = "web")]
pub mod web;

pub use aggregate::{
    collect_citations, collect_idioms, collect_related_words, collect_synonyms, collect_variants,
};
pub use entry::{
    Audio, Citations, LexicalEntry, ListItem, MeaningBlock, Quote, RELATED_WORDS_DISPLAY,
    WordForms,
};
pub use error::NormalizationError;
pub use feed::{
    HomeFeed, HomeSection, PROVERB_OF_THE_DAY, TRENDING_WORDS, WORD_OF_THE_DAY,
    normalize_home_feed, normalize_home_section, parse_home,
};
pub use highlight::{Highlighter, Span, highlight};
pub use normalize::{
    detail_document, meanings_by_language, normalize_detail, normalize_search_item,
    normalize_search_response, normalize_word_item, parse_detail, parse_search,
};
pub use slot::{LanguageSlot, SLOT_BY_INDEX, TextDirection};

use std::collections::HashMap;

/// Citation text of an entry split into spans around its headword.
///
/// Each citation uses its own headword hint, falling back to the primary
/// form. The pattern for a hint is built once and reused.
pub fn highlighted_citations(entry: &LexicalEntry) -> Vec<Vec<Span>> {
    let fallback = Some(entry.forms.primary.as_str()).filter(|form| !form.is_empty());
    let mut compiled: HashMap<Option<&str>, Highlighter> = HashMap::new();
    entry
        .citations
        .items
        .iter()
        .map(|quote| {
            let reference = quote.headword.as_deref().or(fallback);
            compiled
                .entry(reference)
                .or_insert_with(|| Highlighter::new(reference))
                .spans(&quote.text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn citations_highlight_the_headword() {
        let body = json!({
            "BI": { "W1": "ishq" },
            "ML": [{ "R": [{ "SL": { "SW": "ishq", "R": [
                { "RW": [{ "W": "i" }, { "W": "shq" }, { "W": "par" }, { "W": "zor" }], "PN": "Ghalib" },
                { "RW": [{ "W": "kuchh" }, { "W": "aur" }] },
            ] } }] }],
        });
        let entry = parse_detail(&body.to_string()).unwrap();
        let spans = highlighted_citations(&entry);
        assert_eq!(spans.len(), 2);
        assert_eq!(
            spans[0],
            vec![
                Span {
                    text: "i shq".to_string(),
                    emphasized: true,
                },
                Span {
                    text: " par zor".to_string(),
                    emphasized: false,
                },
            ]
        );
        assert!(spans[1].iter().all(|span| !span.emphasized));
    }

    #[test]
    fn primary_form_is_the_fallback_reference() {
        let body = json!({
            "BI": { "W1": "dil" },
            "ML": [{ "R": [{ "SL": { "R": [{ "RW": [{ "W": "Dil" }, { "W": "hi" }] }] } }] }],
        });
        let entry = parse_detail(&body.to_string()).unwrap();
        let spans = highlighted_citations(&entry);
        assert!(spans[0][0].emphasized);
        assert_eq!(spans[0][0].text, "Dil");
    }

    #[test]
    fn entry_serializes_slots_by_name() {
        let body = json!({
            "BI": {},
            "ML": [{ "R": [{ "MGL": [{ "WM": [{ "C": "heart" }] }] }] }],
        });
        let entry = parse_detail(&body.to_string()).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value["meanings_by_language"]["primary"]["definitions"],
            json!(["heart"])
        );
        let back: LexicalEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn each_citation_uses_its_own_script() {
        let body = json!({
            "BI": { "W1": "ishq", "W3": "عشق" },
            "ML": [
                { "R": [{ "SL": { "SW": "ishq", "R": [{ "RW": [{ "W": "ishq" }, { "W": "par" }] }] } }] },
                { "R": [] },
                { "R": [{ "SL": { "SW": "عشق", "R": [{ "RW": [{ "W": "عشق" }, { "W": "پر" }] }] } }] },
            ],
        });
        let entry = parse_detail(&body.to_string()).unwrap();
        let spans = highlighted_citations(&entry);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0][0].text, "ishq");
        assert!(spans[0][0].emphasized);
        assert_eq!(
            spans[1],
            vec![
                Span {
                    text: "عشق".to_string(),
                    emphasized: true,
                },
                Span {
                    text: " پر".to_string(),
                    emphasized: false,
                },
            ]
        );
    }
}

//! Named steps through the provider's optional nesting.
//!
//! Each function covers one path segment and answers `None` (or an empty
//! slice) when that segment is missing, so callers compose them instead of
//! chaining `?.` style lookups inline.

use crate::raw::{
    RawDefinition, RawLanguageMeanings, RawMeaningEntry, RawMeaningGroup, RawQuote, RawQuoteList,
    RawToken,
};

/// `ML[i].R`
pub fn meaning_entries(meanings: &RawLanguageMeanings) -> &[RawMeaningEntry] {
    meanings.entries.as_deref().unwrap_or_default()
}

/// `ML[i].R[0]`
pub fn first_meaning_entry(meanings: &RawLanguageMeanings) -> Option<&RawMeaningEntry> {
    meanings.entries.as_deref()?.first()
}

/// `...MGL`
pub fn meaning_groups(entry: &RawMeaningEntry) -> &[RawMeaningGroup] {
    entry.meaning_groups.as_deref().unwrap_or_default()
}

/// `...MGL[0]`
pub fn first_meaning_group(entry: &RawMeaningEntry) -> Option<&RawMeaningGroup> {
    entry.meaning_groups.as_deref()?.first()
}

/// `...MGL[k].WM`
pub fn group_definitions(group: &RawMeaningGroup) -> Option<&[RawDefinition]> {
    group.definitions.as_deref()
}

/// `ML[i].R[0].MGL[0]`, the group whose definitions represent the slot.
pub fn headline_group(meanings: &RawLanguageMeanings) -> Option<&RawMeaningGroup> {
    first_meaning_entry(meanings).and_then(first_meaning_group)
}

/// `ML[i].R[0].MGL[0].WM`
pub fn headline_definitions(meanings: &RawLanguageMeanings) -> Option<&[RawDefinition]> {
    headline_group(meanings).and_then(group_definitions)
}

/// `...IL.R`
pub fn idiom_items(entry: &RawMeaningEntry) -> &[RawQuote] {
    entry
        .idioms
        .as_ref()
        .and_then(quote_items)
        .unwrap_or_default()
}

/// `...SL`, only when it actually lists citations.
pub fn citation_list(entry: &RawMeaningEntry) -> Option<&RawQuoteList> {
    entry
        .citations
        .as_ref()
        .filter(|list| list.items.is_some())
}

/// `...IL.R` / `...SL.R`
pub fn quote_items(list: &RawQuoteList) -> Option<&[RawQuote]> {
    list.items.as_deref()
}

/// `...VL.R`
pub fn variant_items(entry: &RawMeaningEntry) -> &[RawToken] {
    entry
        .variants
        .as_ref()
        .and_then(|list| list.items.as_deref())
        .unwrap_or_default()
}

/// `W` of a token, trimmed; `None` when absent or blank.
pub fn token_text(token: &RawToken) -> Option<&str> {
    non_blank(token.text.as_deref())
}

/// Trimmed text, `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Joins token texts with single spaces and trims the result.
pub fn join_tokens(tokens: &[RawToken]) -> String {
    tokens
        .iter()
        .filter_map(|token| token.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meanings(value: serde_json::Value) -> RawLanguageMeanings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn headline_definitions_absent_at_each_level() {
        assert!(headline_definitions(&meanings(json!({}))).is_none());
        assert!(headline_definitions(&meanings(json!({ "R": [] }))).is_none());
        assert!(headline_definitions(&meanings(json!({ "R": [{}] }))).is_none());
        assert!(headline_definitions(&meanings(json!({ "R": [{ "MGL": [] }] }))).is_none());
        assert!(headline_definitions(&meanings(json!({ "R": [{ "MGL": [{}] }] }))).is_none());
        let present = meanings(json!({ "R": [{ "MGL": [{ "WM": [{ "C": "love" }] }] }] }));
        assert_eq!(headline_definitions(&present).map(<[_]>::len), Some(1));
    }

    #[test]
    fn join_tokens_skips_missing_text() {
        let tokens: Vec<RawToken> =
            serde_json::from_value(json!([{ "W": " dil" }, {}, { "W": "hi " }, { "W": "to" }]))
                .unwrap();
        assert_eq!(join_tokens(&tokens), "dil hi  to");
        assert_eq!(join_tokens(&[]), "");
    }

    #[test]
    fn citation_list_requires_items() {
        let entry: RawMeaningEntry =
            serde_json::from_value(json!({ "SL": { "HT": "Shers", "SW": "ishq" } })).unwrap();
        assert!(citation_list(&entry).is_none());
        let entry: RawMeaningEntry =
            serde_json::from_value(json!({ "SL": { "HT": "Shers", "R": [] } })).unwrap();
        assert!(citation_list(&entry).is_some());
    }
}

//! Flattening of the per-language meaning blocks into entry-wide lists.
//!
//! Every collector walks the same order: language slot (primary, secondary,
//! tertiary), then meaning entry, then the items of the nested list. The
//! same document therefore always yields the same ordering.

use crate::access::{
    citation_list, group_definitions, idiom_items, join_tokens, meaning_entries, meaning_groups,
    non_blank, quote_items, token_text, variant_items,
};
use crate::entry::{Citations, Quote};
use crate::raw::{RawLanguageMeanings, RawMeaningEntry, RawQuote, RawRelatedWord};
use crate::slot::{LanguageSlot, slotted};
use std::collections::HashSet;
use tracing::debug;

/// Insertion-ordered set keyed by [`dedup_key`]; the first spelling wins.
#[derive(Debug, Default)]
struct FirstSeen {
    keys: HashSet<String>,
    items: Vec<String>,
}

impl FirstSeen {
    fn insert(&mut self, value: &str) {
        if self.keys.insert(dedup_key(value)) {
            self.items.push(value.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Lowercased with all whitespace removed.
pub fn dedup_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn entries_in_order(
    meanings: &[RawLanguageMeanings],
) -> impl Iterator<Item = (LanguageSlot, &RawMeaningEntry)> {
    slotted(meanings).flat_map(|(slot, block)| {
        meaning_entries(block)
            .iter()
            .map(move |entry| (slot, entry))
    })
}

/// Related words of every definition, deduplicated.
pub fn collect_synonyms(meanings: &[RawLanguageMeanings]) -> Vec<String> {
    let mut seen = FirstSeen::default();
    for (_, entry) in entries_in_order(meanings) {
        let words = meaning_groups(entry)
            .iter()
            .filter_map(group_definitions)
            .flatten()
            .flat_map(|definition| definition.related.iter())
            .filter_map(token_text);
        for word in words {
            seen.insert(word);
        }
    }
    seen.into_vec()
}

/// Spelling variants, deduplicated like synonyms.
pub fn collect_variants(meanings: &[RawLanguageMeanings]) -> Vec<String> {
    let mut seen = FirstSeen::default();
    for (_, entry) in entries_in_order(meanings) {
        for word in variant_items(entry).iter().filter_map(token_text) {
            seen.insert(word);
        }
    }
    seen.into_vec()
}

/// Idioms in traversal order. Repeats are kept.
pub fn collect_idioms(meanings: &[RawLanguageMeanings]) -> Vec<Quote> {
    let mut idioms = Vec::new();
    for (slot, entry) in entries_in_order(meanings) {
        for (index, raw) in idiom_items(entry).iter().enumerate() {
            match to_quote(raw) {
                Some(quote) => idioms.push(quote),
                None => debug!(%slot, index, "dropping idiom with no text"),
            }
        }
    }
    idioms
}

/// Poetic citations in traversal order. Repeats are kept.
///
/// Each quote carries the headword hint of its own list, or the entry-wide
/// hint when its list has none. The entry-wide title and hint come from the
/// last list that supplies them.
pub fn collect_citations(meanings: &[RawLanguageMeanings]) -> Citations {
    let mut citations = Citations::default();
    for (slot, entry) in entries_in_order(meanings) {
        let Some(list) = citation_list(entry) else {
            continue;
        };
        let headword = non_blank(list.search_word.as_deref()).map(str::to_string);
        if let Some(title) = non_blank(list.header_title.as_deref()) {
            citations.title = Some(title.to_string());
        }
        if headword.is_some() {
            citations.headword.clone_from(&headword);
        }
        let items = quote_items(list).unwrap_or_default();
        for (index, raw) in items.iter().enumerate() {
            match to_quote(raw) {
                Some(quote) => citations.items.push(Quote {
                    headword: headword.clone(),
                    ..quote
                }),
                None => debug!(%slot, index, "dropping citation with no text"),
            }
        }
    }
    for quote in &mut citations.items {
        if quote.headword.is_none() {
            quote.headword.clone_from(&citations.headword);
        }
    }
    citations
}

/// Display text of each related word, in provider order.
pub fn collect_related_words(related: &[RawRelatedWord]) -> Vec<String> {
    related
        .iter()
        .filter_map(|word| match word {
            RawRelatedWord::Text(text) => non_blank(Some(text.as_str())),
            RawRelatedWord::Token(token) => token_text(token),
        })
        .map(str::to_string)
        .collect()
}

fn to_quote(raw: &RawQuote) -> Option<Quote> {
    let text = join_tokens(&raw.tokens);
    if text.is_empty() {
        return None;
    }
    Some(Quote {
        text,
        attribution: non_blank(raw.poet.as_deref()).map(str::to_string),
        headword: None,
    })
}

use crate::access::{group_definitions, headline_group, join_tokens, non_blank};
use crate::aggregate::{
    collect_citations, collect_idioms, collect_related_words, collect_synonyms, collect_variants,
};
use crate::entry::{Audio, LexicalEntry, ListItem, MeaningBlock, WordForms};
use crate::error::NormalizationError;
use crate::raw::{
    RawBasicInfo, RawDetailDocument, RawLanguageMeanings, RawSearchItem, RawSearchResponse,
    RawWordItem,
};
use crate::slot::{LanguageSlot, SLOT_BY_INDEX, slotted};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds a [`LexicalEntry`] from a word-detail document.
///
/// Fails only when `BI` is missing. Every nested absence below it drops the
/// affected slot or item instead.
pub fn normalize_detail(raw: &RawDetailDocument) -> Result<LexicalEntry, NormalizationError> {
    let info = raw
        .basic_info
        .as_ref()
        .ok_or(NormalizationError::MissingCore)?;

    if raw.meanings_list.len() > SLOT_BY_INDEX.len() {
        debug!(
            count = raw.meanings_list.len(),
            "ignoring meaning lists past the tertiary slot"
        );
    }

    Ok(LexicalEntry {
        id: text_or_empty(info.id.as_deref()),
        forms: detail_forms(info),
        origin: non_blank(info.origin.as_deref()).map(str::to_string),
        audio: Audio {
            available: info.has_audio.unwrap_or(false),
            url: non_blank(info.audio_url.as_deref()).map(str::to_string),
        },
        meanings_by_language: meanings_by_language(&raw.meanings_list),
        synonyms: collect_synonyms(&raw.meanings_list),
        variants: collect_variants(&raw.meanings_list),
        idioms: collect_idioms(&raw.meanings_list),
        citations: collect_citations(&raw.meanings_list),
        related_words: collect_related_words(&raw.related_words),
    })
}

/// Parses and normalizes a detail response body.
///
/// Accepts the provider envelope (`{ "S": .., "R": { "BI": .. } }`) or the
/// bare document.
pub fn parse_detail(json: &str) -> Result<LexicalEntry, NormalizationError> {
    let value: Value = serde_json::from_str(json)?;
    normalize_detail(&detail_document(value)?)
}

/// Unwraps the envelope, if any, and reads the document's declared fields.
pub fn detail_document(value: Value) -> Result<RawDetailDocument, NormalizationError> {
    let Value::Object(mut object) = value else {
        return Err(NormalizationError::NotAnObject);
    };
    let status = object.get("S").cloned();
    let body = match object.remove("R") {
        Some(Value::Object(body)) if !object.contains_key("BI") => {
            let mut body = body;
            if let Some(status) = status {
                body.entry("S").or_insert(status);
            }
            body
        }
        Some(other) => {
            object.insert("R".to_string(), other);
            object
        }
        None => object,
    };
    let document: RawDetailDocument = serde_json::from_value(Value::Object(body))?;
    if let Some(status) = document.status {
        debug!(status, "provider status on detail document");
    }
    Ok(document)
}

/// Slot → definitions of the slot's headline meaning group.
///
/// A slot appears only when at least one definition is non-blank. Definition
/// text is copied as the provider sent it.
pub fn meanings_by_language(
    meanings: &[RawLanguageMeanings],
) -> BTreeMap<LanguageSlot, MeaningBlock> {
    slotted(meanings)
        .filter_map(|(slot, block)| {
            let meaning = meaning_block(slot, block);
            if meaning.is_none() {
                debug!(%slot, "omitting meaning slot without definitions");
            }
            meaning.map(|meaning| (slot, meaning))
        })
        .collect()
}

fn meaning_block(slot: LanguageSlot, block: &RawLanguageMeanings) -> Option<MeaningBlock> {
    let group = headline_group(block)?;
    let raw = group_definitions(group)?;
    if !raw.iter().any(|definition| non_blank(definition.text.as_deref()).is_some()) {
        return None;
    }
    Some(MeaningBlock {
        slot,
        part_of_speech: non_blank(group.meaning_type.as_deref()).map(str::to_string),
        definitions: raw.iter().filter_map(|definition| definition.text.clone()).collect(),
    })
}

fn detail_forms(info: &RawBasicInfo) -> WordForms {
    WordForms {
        primary: text_or_empty(info.roman.as_deref()),
        secondary: text_or_empty(info.devanagari.as_deref()),
        tertiary: text_or_empty(info.urdu.as_deref()),
    }
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Maps a home-feed card. Never fails; absent fields become empty strings.
pub fn normalize_word_item(raw: &RawWordItem) -> ListItem {
    let phrase = if raw.sub_words.is_empty() {
        None
    } else {
        Some(join_tokens(&raw.sub_words)).filter(|text| !text.is_empty())
    };
    ListItem {
        id: text_or_empty(raw.id.as_deref()),
        forms: WordForms {
            primary: text_or_empty(raw.roman.as_deref()),
            secondary: text_or_empty(raw.devanagari.as_deref()),
            tertiary: text_or_empty(raw.urdu.as_deref()),
        },
        meaning: text_or_empty(raw.meaning.as_deref()),
        origin: text_or_empty(raw.origin.as_deref()),
        phrase,
    }
}

/// Maps a search hit. The hit's single spelling lands in the primary form.
pub fn normalize_search_item(raw: &RawSearchItem) -> ListItem {
    ListItem {
        id: text_or_empty(raw.id.as_deref()),
        forms: WordForms {
            primary: text_or_empty(raw.word.as_deref()),
            ..WordForms::default()
        },
        meaning: text_or_empty(raw.meaning.as_deref()),
        origin: String::new(),
        phrase: None,
    }
}

pub fn normalize_search_response(raw: &RawSearchResponse) -> Vec<ListItem> {
    raw.words.iter().map(normalize_search_item).collect()
}

/// Parses a search response body; a missing `WordList` yields no results.
pub fn parse_search(json: &str) -> Result<Vec<ListItem>, serde_json::Error> {
    let raw: RawSearchResponse = serde_json::from_str(json)?;
    Ok(normalize_search_response(&raw))
}

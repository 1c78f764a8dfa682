use crate::slot::{LanguageSlot, TextDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many related words a presentation layer shows. The entry keeps all of them.
pub const RELATED_WORDS_DISPLAY: usize = 10;

/// A headword in each of the provider's three scripts. Missing forms stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WordForms {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

impl WordForms {
    pub fn get(&self, slot: LanguageSlot) -> &str {
        match slot {
            LanguageSlot::Primary => &self.primary,
            LanguageSlot::Secondary => &self.secondary,
            LanguageSlot::Tertiary => &self.tertiary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Audio {
    pub available: bool,
    pub url: Option<String>,
}

impl Audio {
    /// True when the provider flags audio and actually supplied a clip.
    pub fn playable(&self) -> bool {
        self.available && self.url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeaningBlock {
    pub slot: LanguageSlot,
    pub part_of_speech: Option<String>,
    /// Never empty; a slot without definitions is not represented at all.
    pub definitions: Vec<String>,
}

impl MeaningBlock {
    pub fn title(&self) -> &'static str {
        self.slot.title()
    }

    pub fn direction(&self) -> TextDirection {
        self.slot.direction()
    }
}

/// An idiom or poetic citation with its (optional) poet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    pub text: String,
    pub attribution: Option<String>,
    /// Citations only: the headword spelling used by this quote's own list.
    #[serde(default)]
    pub headword: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Citations {
    pub items: Vec<Quote>,
    /// Entry-wide headword hint, from the last citation list that names one.
    pub headword: Option<String>,
    pub title: Option<String>,
}

impl Citations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Canonical, UI-ready view of one dictionary word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LexicalEntry {
    pub id: String,
    pub forms: WordForms,
    /// `None` when the provider does not know the origin.
    pub origin: Option<String>,
    pub audio: Audio,
    pub meanings_by_language: BTreeMap<LanguageSlot, MeaningBlock>,
    pub synonyms: Vec<String>,
    pub variants: Vec<String>,
    pub idioms: Vec<Quote>,
    pub citations: Citations,
    pub related_words: Vec<String>,
}

impl LexicalEntry {
    pub fn meaning(&self, slot: LanguageSlot) -> Option<&MeaningBlock> {
        self.meanings_by_language.get(&slot)
    }

    pub fn related_words_for_display(&self) -> &[String] {
        let end = self.related_words.len().min(RELATED_WORDS_DISPLAY);
        &self.related_words[..end]
    }
}

/// Row shape shared by home-feed cards and search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListItem {
    pub id: String,
    pub forms: WordForms,
    pub meaning: String,
    pub origin: String,
    /// Multi-word text rebuilt from sub-word tokens (proverbs).
    pub phrase: Option<String>,
}

impl ListItem {
    /// Phrase if rebuilt, else the first non-empty form, Urdu script first.
    pub fn display_text(&self) -> &str {
        if let Some(phrase) = self.phrase.as_deref() {
            return phrase;
        }
        [
            &self.forms.tertiary,
            &self.forms.primary,
            &self.forms.secondary,
        ]
        .into_iter()
        .find(|form| !form.is_empty())
        .map(String::as_str)
        .unwrap_or_default()
    }
}

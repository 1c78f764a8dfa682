use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of a meaning block.
///
/// The provider does not tag `ML` entries with a language; the language is
/// implied by position. [`SLOT_BY_INDEX`] is the only place that convention
/// is written down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSlot {
    Primary,
    Secondary,
    Tertiary,
}

/// Provider position of `ML[i]` to language slot. Entries past the end are ignored.
pub const SLOT_BY_INDEX: [LanguageSlot; 3] = [
    LanguageSlot::Primary,
    LanguageSlot::Secondary,
    LanguageSlot::Tertiary,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl LanguageSlot {
    pub fn from_index(index: usize) -> Option<Self> {
        SLOT_BY_INDEX.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            LanguageSlot::Primary => 0,
            LanguageSlot::Secondary => 1,
            LanguageSlot::Tertiary => 2,
        }
    }

    /// Human-facing language name for the slot.
    pub fn title(self) -> &'static str {
        match self {
            LanguageSlot::Primary => "English",
            LanguageSlot::Secondary => "Hindi",
            LanguageSlot::Tertiary => "Urdu",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            LanguageSlot::Tertiary => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }
}

impl fmt::Display for LanguageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSlot::Primary => write!(f, "primary"),
            LanguageSlot::Secondary => write!(f, "secondary"),
            LanguageSlot::Tertiary => write!(f, "tertiary"),
        }
    }
}

/// Pairs each provider list element with its slot, in canonical order.
///
/// Elements beyond the last slot are dropped here and nowhere else.
pub fn slotted<T>(items: &[T]) -> impl Iterator<Item = (LanguageSlot, &T)> {
    SLOT_BY_INDEX.iter().copied().zip(items)
}

use crate::entry::ListItem;
use crate::normalize::normalize_word_item;
use crate::raw::{RawHomeResponse, RawHomeSection};
use serde::{Deserialize, Serialize};

pub const WORD_OF_THE_DAY: &str = "Word of the Day";
pub const PROVERB_OF_THE_DAY: &str = "Today's Proverb";
pub const TRENDING_WORDS: &str = "Trending Words";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HomeSection {
    pub title: String,
    pub items: Vec<ListItem>,
}

/// The home page, sections in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HomeFeed {
    pub sections: Vec<HomeSection>,
}

impl HomeFeed {
    /// First section whose title matches exactly.
    pub fn section(&self, title: &str) -> Option<&HomeSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    pub fn word_of_the_day(&self) -> Option<&ListItem> {
        self.section(WORD_OF_THE_DAY)?.items.first()
    }

    pub fn proverb_of_the_day(&self) -> Option<&ListItem> {
        self.section(PROVERB_OF_THE_DAY)?.items.first()
    }

    pub fn trending(&self) -> &[ListItem] {
        self.section(TRENDING_WORDS)
            .map(|section| section.items.as_slice())
            .unwrap_or_default()
    }
}

/// Maps one home section. Never fails; a missing title becomes empty.
pub fn normalize_home_section(raw: &RawHomeSection) -> HomeSection {
    HomeSection {
        title: raw.header_title.clone().unwrap_or_default(),
        items: raw.items.iter().map(normalize_word_item).collect(),
    }
}

pub fn normalize_home_feed(raw: &RawHomeResponse) -> HomeFeed {
    let sections = raw
        .body
        .as_ref()
        .map(|body| body.sections.as_slice())
        .unwrap_or_default();
    HomeFeed {
        sections: sections.iter().map(normalize_home_section).collect(),
    }
}

/// Parses a home response body; missing sections yield an empty feed.
pub fn parse_home(json: &str) -> Result<HomeFeed, serde_json::Error> {
    let raw: RawHomeResponse = serde_json::from_str(json)?;
    Ok(normalize_home_feed(&raw))
}

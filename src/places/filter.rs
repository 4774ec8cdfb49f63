//! Keyword relevance filter
//!
//! Generic categories such as "book store" return plenty of shops that
//! have nothing to do with comics. A record is kept when its name or
//! address mentions one of a small set of keywords.

use super::types::PlaceRecord;

/// Keywords marking a place as a plausible comic or hobby retailer
pub const KEYWORDS: [&str; 6] = ["comic", "manga", "graphic", "collectible", "game", "hobby"];

/// Order-preserving keyword predicate over place records
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new() -> Self {
        Self {
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether a single record looks relevant
    pub fn matches(&self, place: &PlaceRecord) -> bool {
        let text = place.search_text();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Keep the relevant records, in their original order
    pub fn apply(&self, places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
        places.into_iter().filter(|p| self.matches(p)).collect()
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new()
    }
}

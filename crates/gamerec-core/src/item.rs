//! Catalog records as they move through the pipeline
//!
//! Each stage produces its own table type: [`RawItem`] from the catalog,
//! [`DiscretizedItem`] from the discretizer and [`CombinedItem`] from the
//! combiner. A stage never mutates the table it was given.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GamerecError;

/// Number of genre slots a catalog row carries
pub const GENRE_SLOTS: usize = 3;

/// Number of user tag slots a catalog row carries
pub const TAG_SLOTS: usize = 20;

/// A catalog row exactly as the catalog source supplied it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    /// Item title, possibly empty or carrying ™/® glyphs
    pub id: String,
    pub genres: [Option<String>; GENRE_SLOTS],
    pub tags: [Option<String>; TAG_SLOTS],
    /// Positive review share as text, e.g. `"87%"`
    pub positive_percent: Option<String>,
    /// Total review count as text, e.g. `"12,345"`
    pub total_reviews: Option<String>,
}

impl RawItem {
    /// Create a raw item with the given identifier and no attributes
    pub fn new(id: impl Into<String>) -> Self {
        RawItem {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Fill genre slots in order; values past the last slot are ignored
    pub fn with_genres<S: AsRef<str>>(mut self, genres: &[S]) -> Self {
        for (slot, genre) in self.genres.iter_mut().zip(genres) {
            *slot = Some(genre.as_ref().to_string());
        }
        self
    }

    /// Fill tag slots in order; values past the last slot are ignored
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        for (slot, tag) in self.tags.iter_mut().zip(tags) {
            *slot = Some(tag.as_ref().to_string());
        }
        self
    }

    pub fn with_positive_percent(mut self, value: impl Into<String>) -> Self {
        self.positive_percent = Some(value.into());
        self
    }

    pub fn with_total_reviews(mut self, value: impl Into<String>) -> Self {
        self.total_reviews = Some(value.into());
        self
    }
}

/// Ordinal label derived from a numeric field
///
/// `Level` always holds a value in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BucketRepr", into = "BucketRepr")]
pub enum Bucket {
    Level(u8),
    Unknown,
}

impl Bucket {
    pub const UNKNOWN_LABEL: &'static str = "unknown";

    /// Numeric level, or `None` for an unknown bucket
    pub fn level(&self) -> Option<u8> {
        match self {
            Bucket::Level(level) => Some(*level),
            Bucket::Unknown => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Level(level) => write!(f, "{}", level),
            Bucket::Unknown => write!(f, "{}", Self::UNKNOWN_LABEL),
        }
    }
}

/// Wire form of a bucket: a bare number or the `"unknown"` label
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BucketRepr {
    Level(u8),
    Label(String),
}

impl TryFrom<BucketRepr> for Bucket {
    type Error = GamerecError;

    fn try_from(repr: BucketRepr) -> Result<Self, Self::Error> {
        match repr {
            BucketRepr::Level(level @ 1..=5) => Ok(Bucket::Level(level)),
            BucketRepr::Level(level) => Err(GamerecError::invalid_value("bucket", level)),
            BucketRepr::Label(label) if label == Bucket::UNKNOWN_LABEL => Ok(Bucket::Unknown),
            BucketRepr::Label(label) => Err(GamerecError::invalid_value("bucket", label)),
        }
    }
}

impl From<Bucket> for BucketRepr {
    fn from(bucket: Bucket) -> Self {
        match bucket {
            Bucket::Level(level) => BucketRepr::Level(level),
            Bucket::Unknown => BucketRepr::Label(Bucket::UNKNOWN_LABEL.to_string()),
        }
    }
}

/// A cleaned catalog row with its quality and popularity buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscretizedItem {
    pub id: String,
    pub genres: [Option<String>; GENRE_SLOTS],
    pub tags: [Option<String>; TAG_SLOTS],
    /// Bucket of the positive review percentage
    pub quality: Bucket,
    /// Bucket of the review count's rank in the catalog
    pub popularity: Bucket,
}

impl DiscretizedItem {
    /// Non-missing genre and tag values in slot order
    pub fn attribute_values(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .chain(self.tags.iter())
            .filter_map(|value| value.as_deref())
    }
}

/// A discretized item with its normalized attribute string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedItem {
    #[serde(flatten)]
    pub item: DiscretizedItem,
    /// Space separated normalized attribute tokens; never empty
    pub combined: String,
}

impl CombinedItem {
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Attribute tokens in slot order, duplicates included
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.combined.split_whitespace()
    }

    /// Distinct attribute tokens
    pub fn attribute_set(&self) -> BTreeSet<&str> {
        self.tokens().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_item_builders_fill_slots_in_order() {
        let item = RawItem::new("Portal 2")
            .with_genres(&["Action", "Adventure"])
            .with_tags(&["Puzzle", "Co-op"]);

        assert_eq!(item.genres[0].as_deref(), Some("Action"));
        assert_eq!(item.genres[1].as_deref(), Some("Adventure"));
        assert_eq!(item.genres[2], None);
        assert_eq!(item.tags[1].as_deref(), Some("Co-op"));
        assert!(item.tags[2..].iter().all(Option::is_none));
    }

    #[test]
    fn test_with_genres_ignores_overflow() {
        let item = RawItem::new("x").with_genres(&["a", "b", "c", "d"]);
        assert_eq!(item.genres[2].as_deref(), Some("c"));
    }

    #[test]
    fn test_bucket_serializes_as_number_or_label() {
        assert_eq!(serde_json::to_string(&Bucket::Level(4)).unwrap(), "4");
        assert_eq!(
            serde_json::to_string(&Bucket::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_bucket_deserialize_rejects_out_of_range() {
        assert_eq!(
            serde_json::from_str::<Bucket>("5").unwrap(),
            Bucket::Level(5)
        );
        assert_eq!(
            serde_json::from_str::<Bucket>("\"unknown\"").unwrap(),
            Bucket::Unknown
        );
        assert!(serde_json::from_str::<Bucket>("0").is_err());
        assert!(serde_json::from_str::<Bucket>("6").is_err());
        assert!(serde_json::from_str::<Bucket>("\"high\"").is_err());
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::Level(2).to_string(), "2");
        assert_eq!(Bucket::Unknown.to_string(), "unknown");
        assert_eq!(Bucket::Unknown.level(), None);
    }

    #[test]
    fn test_attribute_set_dedups_tokens() {
        let item = CombinedItem {
            item: DiscretizedItem {
                id: "a".into(),
                genres: Default::default(),
                tags: Default::default(),
                quality: Bucket::Unknown,
                popularity: Bucket::Unknown,
            },
            combined: "rpg action rpg".into(),
        };
        let set = item.attribute_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("rpg"));
        assert_eq!(item.tokens().count(), 3);
    }
}

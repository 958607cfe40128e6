//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::item::{GENRE_SLOTS, TAG_SLOTS};
use crate::similarity::Metric;

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Catalog CSV column layout
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Similarity engine settings
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Recommender settings
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            version: STORE_FORMAT_VERSION,
            catalog: CatalogConfig::default(),
            similarity: SimilarityConfig::default(),
            recommend: RecommendConfig::default(),
        }
    }
}

/// Column names of the catalog CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Identifier column; the first column is used when it is absent
    #[serde(default = "default_identifier_column")]
    pub identifier_column: String,

    /// Prefix of the numbered genre columns (`Genre1`..`Genre3`)
    #[serde(default = "default_genre_prefix")]
    pub genre_prefix: String,

    /// Prefix of the numbered tag columns (`Tag1`..`Tag20`)
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_percent_column")]
    pub percent_column: String,

    #[serde(default = "default_reviews_column")]
    pub reviews_column: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            identifier_column: default_identifier_column(),
            genre_prefix: default_genre_prefix(),
            tag_prefix: default_tag_prefix(),
            percent_column: default_percent_column(),
            reviews_column: default_reviews_column(),
        }
    }
}

impl CatalogConfig {
    /// Genre column names in slot order
    pub fn genre_columns(&self) -> Vec<String> {
        numbered_columns(&self.genre_prefix, GENRE_SLOTS)
    }

    /// Tag column names in slot order
    pub fn tag_columns(&self) -> Vec<String> {
        numbered_columns(&self.tag_prefix, TAG_SLOTS)
    }
}

fn numbered_columns(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{}{}", prefix, n)).collect()
}

/// Configuration for the similarity engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Metric used when a command does not name one
    #[serde(default)]
    pub default_metric: Metric,

    /// Compute matrix rows on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        SimilarityConfig {
            default_metric: Metric::default(),
            parallel: default_parallel(),
        }
    }
}

/// Configuration for recommendation queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Number of recommendations returned when `-k` is not given
    #[serde(default = "default_count")]
    pub default_count: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        RecommendConfig {
            default_count: default_count(),
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_identifier_column() -> String {
    "Title".to_string()
}

fn default_genre_prefix() -> String {
    "Genre".to_string()
}

fn default_tag_prefix() -> String {
    "Tag".to_string()
}

fn default_percent_column() -> String {
    "PosPercent".to_string()
}

fn default_reviews_column() -> String {
    "TotalReviews".to_string()
}

fn default_parallel() -> bool {
    true
}

fn default_count() -> usize {
    3
}

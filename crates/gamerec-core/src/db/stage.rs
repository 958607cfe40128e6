//! Named pipeline stages and their tables

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{GamerecError, Result};
use crate::item::{CombinedItem, DiscretizedItem, RawItem};
use crate::similarity::Metric;

/// A pipeline stage whose output is persisted as one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Raw,
    Discretized,
    Preprocessed,
    Similarity(Metric),
}

impl Stage {
    /// Every stage in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Raw,
        Stage::Discretized,
        Stage::Preprocessed,
        Stage::Similarity(Metric::Cosine),
        Stage::Similarity(Metric::Jaccard),
    ];

    /// Table name of this stage
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Raw => "raw",
            Stage::Discretized => "discretized",
            Stage::Preprocessed => "preprocessed",
            Stage::Similarity(metric) => metric.stage_name(),
        }
    }

    /// CLI command that writes this stage
    pub fn producer(&self) -> &'static str {
        match self {
            Stage::Raw => "import",
            Stage::Discretized => "discretize",
            Stage::Preprocessed => "combine",
            Stage::Similarity(_) => "similarity",
        }
    }

    /// Error for reading this stage before it has been written
    pub fn missing(&self) -> GamerecError {
        GamerecError::StageMissing {
            stage: self.name().to_string(),
            command: self.producer().to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = GamerecError;

    fn from_str(s: &str) -> Result<Self> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| GamerecError::invalid_value("stage", s))
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A record that can be stored as a stage row
pub trait StageRow {
    /// Identifier stored alongside the payload
    fn row_id(&self) -> &str;
}

impl StageRow for RawItem {
    fn row_id(&self) -> &str {
        &self.id
    }
}

impl StageRow for DiscretizedItem {
    fn row_id(&self) -> &str {
        &self.id
    }
}

impl StageRow for CombinedItem {
    fn row_id(&self) -> &str {
        self.id()
    }
}

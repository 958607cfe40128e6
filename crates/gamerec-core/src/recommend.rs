//! Recommender: top-k most similar items for a query
//!
//! Ranking is by score descending. Equal scores rank the item with the lower
//! canonical index first, so results are deterministic for any matrix.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::discretize::clean_identifier;
use crate::error::{GamerecError, Result};
use crate::item::CombinedItem;
use crate::similarity::SimilarityMatrix;

/// Canonical identifier to index mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ItemIndex {
    /// Build from identifiers in canonical order
    ///
    /// Fails if an identifier appears twice, since lookups would be ambiguous.
    pub fn new(ids: Vec<String>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if positions.insert(id.clone(), index).is_some() {
                return Err(GamerecError::invariant(format!(
                    "identifier '{}' appears more than once in the canonical index",
                    id
                )));
            }
        }
        Ok(ItemIndex { ids, positions })
    }

    /// Build from the combiner's output table
    pub fn from_items(items: &[CombinedItem]) -> Result<Self> {
        Self::new(items.iter().map(|item| item.id().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Resolve a user supplied query, cleaning it the way identifiers are cleaned
    pub fn resolve(&self, query: &str) -> Result<usize> {
        self.position(query)
            .or_else(|| self.position(&clean_identifier(query)))
            .ok_or_else(|| GamerecError::unknown_item(query))
    }
}

/// A ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    /// Canonical index of the recommended item
    pub index: usize,
    pub score: f64,
}

/// Order candidates by score descending, then canonical index ascending
fn rank(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Strategy-agnostic top-k lookup over a similarity matrix
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    index: &'a ItemIndex,
    matrix: &'a SimilarityMatrix,
}

impl<'a> Recommender<'a> {
    /// Pair an index with a matrix computed over the same items
    pub fn new(index: &'a ItemIndex, matrix: &'a SimilarityMatrix) -> Result<Self> {
        if index.len() != matrix.size() {
            return Err(GamerecError::invariant(format!(
                "similarity matrix covers {} items but the index has {}",
                matrix.size(),
                index.len()
            )));
        }
        Ok(Recommender { index, matrix })
    }

    /// Top `k` recommendations with scores
    ///
    /// Returns exactly `min(k, N - 1)` entries and never the query itself.
    pub fn recommend_scored(&self, query: &str, k: usize) -> Result<Vec<Recommendation>> {
        let query_index = self.index.resolve(query)?;

        let mut candidates: Vec<(usize, f64)> = self
            .matrix
            .row(query_index)
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, _)| *index != query_index)
            .collect();

        candidates.sort_by(rank);
        candidates.truncate(k);

        tracing::debug!(
            query = %query,
            query_index,
            results = candidates.len(),
            "ranked recommendations"
        );

        Ok(candidates
            .into_iter()
            .map(|(index, score)| Recommendation {
                id: self.index.ids[index].clone(),
                index,
                score,
            })
            .collect())
    }

    /// Top `k` recommended identifiers, most similar first
    pub fn recommend(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(query, k)?
            .into_iter()
            .map(|rec| rec.id)
            .collect())
    }
}

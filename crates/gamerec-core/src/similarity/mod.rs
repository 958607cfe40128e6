//! Similarity engine: all-pairs similarity matrices over combined items
//!
//! Two interchangeable strategies share the [`SimilarityStrategy`] trait:
//! cosine over term-frequency vectors and Jaccard over attribute sets. Both
//! produce a [`SimilarityMatrix`] indexed by the order of the items they were
//! given, which is the canonical order fixed by the combiner.

mod cosine;
mod jaccard;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GamerecError, Result};
use crate::item::CombinedItem;
use crate::trace_time;

pub use cosine::{cosine_similarity, CosineStrategy, TermVector, Vocabulary};
pub use jaccard::{jaccard_similarity, JaccardStrategy};

/// Similarity metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine over term-frequency vectors (default)
    #[default]
    Cosine,
    /// Jaccard over attribute sets
    Jaccard,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Cosine, Metric::Jaccard];

    /// Name of the stage table holding this metric's matrix
    pub fn stage_name(&self) -> &'static str {
        match self {
            Metric::Cosine => "cosine similarity",
            Metric::Jaccard => "jaccard similarity",
        }
    }
}

impl FromStr for Metric {
    type Err = GamerecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "jaccard" => Ok(Metric::Jaccard),
            other => Err(GamerecError::invalid_value(
                "metric (expected cosine or jaccard)",
                other,
            )),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Cosine => write!(f, "cosine"),
            Metric::Jaccard => write!(f, "jaccard"),
        }
    }
}

/// Square N×N matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GamerecError::invariant(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }

        Ok(SimilarityMatrix { size, values })
    }

    /// Number of items (rows and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score between items `i` and `j`
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(j < self.size, "column {} out of bounds", j);
        self.values[i * self.size + j]
    }

    /// All scores for item `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, so an empty matrix iterates an empty slice
        self.values.chunks_exact(self.size.max(1))
    }

    /// Whether `m[i][j] == m[j][i]` for every pair
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// A way of scoring every pair of items
pub trait SimilarityStrategy: Send + Sync {
    /// Metric this strategy implements
    fn metric(&self) -> Metric;

    /// Compute the full similarity matrix for `items` in the given order
    fn compute_matrix(&self, items: &[CombinedItem]) -> SimilarityMatrix;
}

/// Strategy implementing `metric`
pub fn strategy_for(metric: Metric, parallel: bool) -> Box<dyn SimilarityStrategy> {
    match metric {
        Metric::Cosine => Box::new(CosineStrategy::new(parallel)),
        Metric::Jaccard => Box::new(JaccardStrategy::new(parallel)),
    }
}

/// Fill an N×N matrix from a pairwise scoring function
///
/// Rows are independent, so with `parallel` each row is computed on the
/// rayon pool and the rows are stitched together at the end.
fn build_matrix<F>(size: usize, parallel: bool, score: F) -> SimilarityMatrix
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    let start = Instant::now();
    let row = |i: usize| -> Vec<f64> { (0..size).map(|j| score(i, j)).collect() };

    let rows: Vec<Vec<f64>> = if parallel {
        (0..size).into_par_iter().map(row).collect()
    } else {
        (0..size).map(row).collect()
    };

    trace_time!(start, "build_matrix", size = size, parallel = parallel);

    SimilarityMatrix {
        size,
        values: rows.into_iter().flatten().collect(),
    }
}

#[cfg(test)]
mod tests;

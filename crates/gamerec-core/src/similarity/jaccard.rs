use std::collections::BTreeSet;

use crate::error::GamerecError;
use crate::item::CombinedItem;
use crate::similarity::{build_matrix, Metric, SimilarityMatrix, SimilarityStrategy};

/// Jaccard similarity of two attribute sets
///
/// - Score = intersection / union
/// - Two empty sets score 0.0 rather than being undefined
pub fn jaccard_similarity(set_a: &BTreeSet<&str>, set_b: &BTreeSet<&str>) -> f64 {
    let shared_count = set_a.intersection(set_b).count();
    let union_count = set_a.len() + set_b.len() - shared_count;

    if union_count == 0 {
        return 0.0;
    }

    shared_count as f64 / union_count as f64
}

/// Jaccard similarity over each item's distinct attribute tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardStrategy {
    parallel: bool,
}

impl JaccardStrategy {
    pub fn new(parallel: bool) -> Self {
        JaccardStrategy { parallel }
    }
}

impl SimilarityStrategy for JaccardStrategy {
    fn metric(&self) -> Metric {
        Metric::Jaccard
    }

    fn compute_matrix(&self, items: &[CombinedItem]) -> SimilarityMatrix {
        let sets: Vec<BTreeSet<&str>> = items.iter().map(|item| item.attribute_set()).collect();

        for (item, set) in items.iter().zip(&sets) {
            if set.is_empty() {
                let err = GamerecError::invariant(format!(
                    "item '{}' reached the similarity engine without attributes",
                    item.id()
                ));
                tracing::warn!(error = %err, "scoring item as dissimilar to everything");
            }
        }

        tracing::debug!(items = items.len(), "computing jaccard similarity");

        build_matrix(items.len(), self.parallel, |i, j| {
            if i == j {
                if sets[i].is_empty() {
                    0.0
                } else {
                    1.0
                }
            } else {
                jaccard_similarity(&sets[i], &sets[j])
            }
        })
    }
}

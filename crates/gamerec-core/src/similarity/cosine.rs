use std::collections::BTreeMap;

use crate::item::CombinedItem;
use crate::similarity::{build_matrix, Metric, SimilarityMatrix, SimilarityStrategy};

/// Every distinct token across a set of items, in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Build the vocabulary of whitespace tokens in `items`
    pub fn build(items: &[CombinedItem]) -> Self {
        let mut terms: BTreeMap<String, usize> = BTreeMap::new();
        for token in items.iter().flat_map(|item| item.tokens()) {
            if !terms.contains_key(token) {
                terms.insert(token.to_string(), 0);
            }
        }

        for (position, index) in terms.values_mut().enumerate() {
            *index = position;
        }

        Vocabulary { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of `term` in the vectorized form, if it is in the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    /// Term-frequency vector of a token stream; unknown tokens are ignored
    pub fn vectorize<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> TermVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for index in tokens.into_iter().filter_map(|t| self.index_of(t)) {
            *counts.entry(index).or_insert(0.0) += 1.0;
        }
        TermVector::from_sorted(counts.into_iter().collect())
    }
}

/// Sparse term-frequency vector with entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
    norm: f64,
}

impl TermVector {
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        TermVector { entries, norm }
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Weight of term `index`, zero when absent
    pub fn weight(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    fn dot(&self, other: &TermVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;

        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }

        dot
    }
}

/// Cosine similarity of two term vectors; zero when either has no terms
pub fn cosine_similarity(vec_a: &TermVector, vec_b: &TermVector) -> f64 {
    if vec_a.norm == 0.0 || vec_b.norm == 0.0 {
        return 0.0;
    }

    // identical vectors can land a hair above 1.0 after the square roots
    (vec_a.dot(vec_b) / (vec_a.norm * vec_b.norm)).min(1.0)
}

/// Cosine similarity over bag-of-words term frequencies
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineStrategy {
    parallel: bool,
}

impl CosineStrategy {
    pub fn new(parallel: bool) -> Self {
        CosineStrategy { parallel }
    }
}

impl SimilarityStrategy for CosineStrategy {
    fn metric(&self) -> Metric {
        Metric::Cosine
    }

    fn compute_matrix(&self, items: &[CombinedItem]) -> SimilarityMatrix {
        let vocabulary = Vocabulary::build(items);
        let vectors: Vec<TermVector> = items
            .iter()
            .map(|item| vocabulary.vectorize(item.tokens()))
            .collect();

        tracing::debug!(
            items = items.len(),
            vocabulary = vocabulary.len(),
            "computing cosine similarity"
        );

        build_matrix(items.len(), self.parallel, |i, j| {
            if i == j {
                // exact 1.0 rather than dot/norm² rounding
                if vectors[i].norm > 0.0 {
                    1.0
                } else {
                    0.0
                }
            } else {
                cosine_similarity(&vectors[i], &vectors[j])
            }
        })
    }
}

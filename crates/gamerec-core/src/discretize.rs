//! Discretizer: raw catalog rows to bucketed items
//!
//! Percentages map onto fixed 20-point bands. Review counts map onto bands
//! cut at the 20th/40th/60th/80th percentile of every known count in the
//! catalog, so popularity is relative to the catalog being processed.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{GamerecError, Result};
use crate::item::{Bucket, DiscretizedItem, RawItem};
use crate::trace_time;

/// Percentile ranks used for the popularity cutoffs
pub const POPULARITY_PERCENTILES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Sentinel some catalogs use for a missing percentage
const MISSING_PERCENT: &str = "na";

const TRADEMARK: char = '\u{2122}';
const REGISTERED: char = '\u{00ae}';

/// Strip ™/® glyphs and surrounding whitespace from an item title
pub fn clean_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != TRADEMARK && *c != REGISTERED)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a positive review percentage such as `"87%"`
///
/// Returns `Ok(None)` for a blank value or the `na` sentinel.
pub fn parse_percent(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    let value = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    if value.is_empty() || value.eq_ignore_ascii_case(MISSING_PERCENT) {
        return Ok(None);
    }

    let pct: f64 = value
        .parse()
        .map_err(|e| GamerecError::malformed("percentage", raw, e))?;

    if !(0.0..=100.0).contains(&pct) {
        return Err(GamerecError::malformed(
            "percentage",
            raw,
            "outside 0-100",
        ));
    }

    Ok(Some(pct))
}

/// Parse a review count such as `"12,345"`
///
/// Returns `Ok(None)` for a blank value.
pub fn parse_count(raw: &str) -> Result<Option<u64>> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return Ok(None);
    }

    digits
        .parse()
        .map(Some)
        .map_err(|e| GamerecError::malformed("review count", raw, e))
}

/// Bucket a positive review percentage into 1-5
///
/// Band upper bounds are inclusive: 20 is a 1, 20.5 is a 2.
pub fn percent_bucket(pct: f64) -> Bucket {
    match pct {
        p if (0.0..=20.0).contains(&p) => Bucket::Level(1),
        p if p > 20.0 && p <= 40.0 => Bucket::Level(2),
        p if p > 40.0 && p <= 60.0 => Bucket::Level(3),
        p if p > 60.0 && p <= 80.0 => Bucket::Level(4),
        p if p > 80.0 && p <= 100.0 => Bucket::Level(5),
        _ => Bucket::Unknown,
    }
}

/// Review count values at the 20th/40th/60th/80th percentile ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoffs {
    pub c20: u64,
    pub c40: u64,
    pub c60: u64,
    pub c80: u64,
}

impl Cutoffs {
    /// Bucket a review count into 1-5
    pub fn bucket(&self, count: u64) -> Bucket {
        if count <= self.c20 {
            Bucket::Level(1)
        } else if count <= self.c40 {
            Bucket::Level(2)
        } else if count <= self.c60 {
            Bucket::Level(3)
        } else if count <= self.c80 {
            Bucket::Level(4)
        } else {
            Bucket::Level(5)
        }
    }
}

/// Index into a sorted population of `len` values for percentile `q`
fn percentile_index(len: usize, q: f64) -> usize {
    // n*q never lands exactly on .5 for the fixed ranks, so rounding mode is moot
    let index = (len as f64 * q).round() as usize;
    index.min(len - 1)
}

/// Compute popularity cutoffs from ascending review counts
///
/// Returns `None` when no count is known.
pub fn compute_cutoffs(sorted_counts: &[u64]) -> Option<Cutoffs> {
    if sorted_counts.is_empty() {
        return None;
    }

    debug_assert!(sorted_counts.windows(2).all(|w| w[0] <= w[1]));

    let [q20, q40, q60, q80] = POPULARITY_PERCENTILES;
    let at = |q: f64| sorted_counts[percentile_index(sorted_counts.len(), q)];

    Some(Cutoffs {
        c20: at(q20),
        c40: at(q40),
        c60: at(q60),
        c80: at(q80),
    })
}

/// Result of discretizing a raw table
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizeOutput {
    /// Discretized items in first-seen order of their identifiers
    pub items: Vec<DiscretizedItem>,
    /// Popularity cutoffs, `None` when no review count was known
    pub cutoffs: Option<Cutoffs>,
    /// Rows dropped for an empty identifier
    pub dropped: usize,
    /// Numeric fields that failed to parse and were bucketed as unknown
    pub malformed: usize,
}

/// Cleaned identifier, source row, parsed percentage and parsed count
type ParsedRow<'a> = (String, &'a RawItem, Option<f64>, Option<u64>);

/// Parse a raw field, degrading a malformed value to missing
fn recover<T>(id: &str, parsed: Result<Option<T>>, malformed: &mut usize) -> Option<T> {
    match parsed {
        Ok(value) => value,
        Err(err) => {
            *malformed += 1;
            tracing::warn!(item = %id, error = %err, "malformed record, bucket set to unknown");
            None
        }
    }
}

/// Discretize a raw catalog table
///
/// Popularity cutoffs are taken over the review count of every raw row,
/// including rows later dropped for a blank identifier or replaced as
/// duplicates. Rows without an identifier are then dropped. When two rows
/// clean to the same identifier the later row wins but keeps the earlier
/// row's position.
pub fn discretize(raw: &[RawItem]) -> DiscretizeOutput {
    let start = Instant::now();
    let mut malformed = 0;

    let parsed: Vec<ParsedRow<'_>> = raw
        .iter()
        .map(|item| {
            let id = clean_identifier(&item.id);
            let pct = item
                .positive_percent
                .as_deref()
                .and_then(|v| recover(&id, parse_percent(v), &mut malformed));
            let count = item
                .total_reviews
                .as_deref()
                .and_then(|v| recover(&id, parse_count(v), &mut malformed));
            (id, item, pct, count)
        })
        .collect();

    let mut known: Vec<u64> = parsed.iter().filter_map(|(_, _, _, count)| *count).collect();
    known.sort_unstable();
    let cutoffs = compute_cutoffs(&known);

    let mut dropped = 0;
    let mut rows: Vec<ParsedRow<'_>> = Vec::with_capacity(parsed.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in parsed {
        if row.0.is_empty() {
            dropped += 1;
            continue;
        }

        match positions.get(&row.0) {
            Some(&pos) => {
                tracing::warn!(item = %row.0, "duplicate identifier, keeping the later row");
                rows[pos] = row;
            }
            None => {
                positions.insert(row.0.clone(), rows.len());
                rows.push(row);
            }
        }
    }

    let items: Vec<DiscretizedItem> = rows
        .into_iter()
        .map(|(id, item, pct, count)| DiscretizedItem {
            id,
            genres: item.genres.clone(),
            tags: item.tags.clone(),
            quality: pct.map(percent_bucket).unwrap_or(Bucket::Unknown),
            popularity: match (count, cutoffs) {
                (Some(count), Some(cutoffs)) => cutoffs.bucket(count),
                _ => Bucket::Unknown,
            },
        })
        .collect();

    tracing::info!(
        items = items.len(),
        dropped,
        malformed,
        known_counts = known.len(),
        "discretized catalog"
    );
    trace_time!(start, "discretize");

    DiscretizeOutput {
        items,
        cutoffs,
        dropped,
        malformed,
    }
}

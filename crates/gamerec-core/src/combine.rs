//! Feature combiner: one normalized attribute string per item

use std::time::Instant;

use crate::error::{GamerecError, Result};
use crate::item::{CombinedItem, DiscretizedItem};
use crate::trace_time;

/// Normalize one attribute value into a single token
///
/// Whitespace and hyphens are removed and the result lowercased, so
/// `"Open World"` and `"open-world"` both become `"openworld"`.
pub fn normalize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Join normalized attribute values into a space separated token string
///
/// Values that normalize to nothing are skipped.
pub fn normalize_attributes<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(normalize_value)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combine a single item's genre and tag values
///
/// Fails with [`GamerecError::EmptyItem`] when the item has no usable values.
pub fn combine_item(item: &DiscretizedItem) -> Result<CombinedItem> {
    let combined = normalize_attributes(item.attribute_values());

    if combined.is_empty() {
        return Err(GamerecError::EmptyItem {
            id: item.id.clone(),
        });
    }

    Ok(CombinedItem {
        item: item.clone(),
        combined,
    })
}

/// Combine every item, dropping the ones without attributes
///
/// Relative order of the surviving items is preserved; that order is the
/// canonical index for the similarity matrices.
pub fn combine(items: &[DiscretizedItem]) -> Vec<CombinedItem> {
    let start = Instant::now();

    let combined: Vec<CombinedItem> = items
        .iter()
        .filter_map(|item| match combine_item(item) {
            Ok(combined) => Some(combined),
            Err(err) => {
                tracing::debug!(error = %err, "dropping item");
                None
            }
        })
        .collect();

    tracing::info!(
        items = combined.len(),
        dropped = items.len() - combined.len(),
        "combined attributes"
    );
    trace_time!(start, "combine");

    combined
}

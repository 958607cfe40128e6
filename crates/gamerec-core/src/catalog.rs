//! Catalog CSV import and stage export
//!
//! The catalog is a CSV file with a header row. Column names come from
//! [`CatalogConfig`]; missing columns and empty cells are missing values.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::item::{Bucket, CombinedItem, DiscretizedItem, RawItem, GENRE_SLOTS, TAG_SLOTS};

/// Suffix appended to a numeric column's name for its bucket column in exports
pub const DISCRETE_SUFFIX: &str = "Discrete";
/// Header of the combined attribute string in exports
pub const COMBINED_COLUMN: &str = "CombinedData";

/// Resolved column positions for one CSV header
#[derive(Debug, Clone)]
struct ColumnLayout {
    id: usize,
    genres: [Option<usize>; GENRE_SLOTS],
    tags: [Option<usize>; TAG_SLOTS],
    percent: Option<usize>,
    reviews: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord, config: &CatalogConfig) -> Self {
        let id = match find_column(headers, &config.identifier_column) {
            Some(index) => index,
            None => {
                tracing::debug!(
                    column = %config.identifier_column,
                    "identifier column not found, using the first column"
                );
                0
            }
        };

        let mut genres = [None; GENRE_SLOTS];
        for (slot, name) in genres.iter_mut().zip(config.genre_columns()) {
            *slot = find_column(headers, &name);
        }

        let mut tags = [None; TAG_SLOTS];
        for (slot, name) in tags.iter_mut().zip(config.tag_columns()) {
            *slot = find_column(headers, &name);
        }

        ColumnLayout {
            id,
            genres,
            tags,
            percent: find_column(headers, &config.percent_column),
            reviews: find_column(headers, &config.reviews_column),
        }
    }

    fn parse(&self, record: &StringRecord) -> RawItem {
        let cell = |index: Option<usize>| -> Option<String> {
            index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut item = RawItem::new(record.get(self.id).unwrap_or_default());
        for (slot, column) in item.genres.iter_mut().zip(self.genres) {
            *slot = cell(column);
        }
        for (slot, column) in item.tags.iter_mut().zip(self.tags) {
            *slot = cell(column);
        }
        item.positive_percent = cell(self.percent);
        item.total_reviews = cell(self.reviews);
        item
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Read a catalog CSV file into raw items, in file order
pub fn read_catalog(path: &Path, config: &CatalogConfig) -> Result<Vec<RawItem>> {
    let file = std::fs::File::open(path)?;
    let items = read_catalog_from(file, config)?;
    tracing::info!(path = %path.display(), rows = items.len(), "read catalog");
    Ok(items)
}

/// Read catalog rows from any reader
pub fn read_catalog_from<R: Read>(reader: R, config: &CatalogConfig) -> Result<Vec<RawItem>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::resolve(&headers, config);

    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        items.push(layout.parse(&record));
    }
    Ok(items)
}

fn bucket_cell(bucket: Bucket) -> String {
    bucket.level().map(|l| l.to_string()).unwrap_or_default()
}

fn header_row(config: &CatalogConfig, combined: bool) -> Vec<String> {
    let mut header = Vec::with_capacity(3 + GENRE_SLOTS + TAG_SLOTS);
    header.push(config.identifier_column.clone());
    header.extend(config.genre_columns());
    header.extend(config.tag_columns());
    header.push(format!("{}{}", config.percent_column, DISCRETE_SUFFIX));
    header.push(format!("{}{}", config.reviews_column, DISCRETE_SUFFIX));
    if combined {
        header.push(COMBINED_COLUMN.to_string());
    }
    header
}

fn item_row(item: &DiscretizedItem) -> Vec<String> {
    let mut row = Vec::with_capacity(3 + GENRE_SLOTS + TAG_SLOTS);
    row.push(item.id.clone());
    row.extend(
        item.genres
            .iter()
            .chain(item.tags.iter())
            .map(|value| value.clone().unwrap_or_default()),
    );
    row.push(bucket_cell(item.quality));
    row.push(bucket_cell(item.popularity));
    row
}

/// Write the discretized table as CSV; unknown buckets are empty cells
pub fn write_discretized<W: Write>(
    writer: W,
    items: &[DiscretizedItem],
    config: &CatalogConfig,
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(header_row(config, false))?;
    for item in items {
        writer.write_record(item_row(item))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the preprocessed table as CSV, with the combined string last
pub fn write_combined<W: Write>(
    writer: W,
    items: &[CombinedItem],
    config: &CatalogConfig,
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(header_row(config, true))?;
    for item in items {
        let mut row = item_row(&item.item);
        row.push(item.combined.clone());
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

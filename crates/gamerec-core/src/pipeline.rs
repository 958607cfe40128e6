//! Stage orchestration over the store database
//!
//! Each step reads its input stage, runs the pure transformation and writes
//! its output stage. Steps only communicate through stage tables.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::bail_usage;
use crate::catalog;
use crate::combine::combine;
use crate::config::RecommenderConfig;
use crate::db::{Database, Stage};
use crate::discretize::{discretize, Cutoffs};
use crate::error::Result;
use crate::item::{CombinedItem, DiscretizedItem, RawItem};
use crate::recommend::{ItemIndex, Recommendation, Recommender};
use crate::similarity::{strategy_for, Metric};

/// Outcome of importing a catalog file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub rows: usize,
}

/// Outcome of the discretize step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscretizeReport {
    pub items: usize,
    pub dropped: usize,
    pub malformed: usize,
    pub cutoffs: Option<Cutoffs>,
}

/// Outcome of the combine step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombineReport {
    pub items: usize,
    pub dropped: usize,
}

/// Outcome of computing one similarity matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub metric: Metric,
    pub size: usize,
}

/// Outcome of a full build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub import: ImportReport,
    pub discretize: DiscretizeReport,
    pub combine: CombineReport,
    pub similarity: Vec<SimilarityReport>,
}

/// Read a catalog CSV and write it as the raw stage
pub fn import_catalog(
    db: &Database,
    path: &Path,
    config: &RecommenderConfig,
) -> Result<ImportReport> {
    if !path.is_file() {
        bail_usage!(format!("catalog file not found: {}", path.display()));
    }

    let items = catalog::read_catalog(path, &config.catalog)?;
    db.write_items(Stage::Raw, &items)?;
    Ok(ImportReport { rows: items.len() })
}

/// raw → discretized
pub fn run_discretize(db: &Database) -> Result<DiscretizeReport> {
    let raw: Vec<RawItem> = db.read_items(Stage::Raw)?;
    let output = discretize(&raw);
    db.write_items(Stage::Discretized, &output.items)?;

    Ok(DiscretizeReport {
        items: output.items.len(),
        dropped: output.dropped,
        malformed: output.malformed,
        cutoffs: output.cutoffs,
    })
}

/// discretized → preprocessed
pub fn run_combine(db: &Database) -> Result<CombineReport> {
    let items: Vec<DiscretizedItem> = db.read_items(Stage::Discretized)?;
    let combined = combine(&items);
    db.write_items(Stage::Preprocessed, &combined)?;

    Ok(CombineReport {
        items: combined.len(),
        dropped: items.len() - combined.len(),
    })
}

/// preprocessed → one similarity stage per metric
pub fn run_similarity(
    db: &Database,
    metrics: &[Metric],
    parallel: bool,
) -> Result<Vec<SimilarityReport>> {
    let items: Vec<CombinedItem> = db.read_items(Stage::Preprocessed)?;
    let index = ItemIndex::from_items(&items)?;
    let ids: Vec<String> = items.iter().map(|item| item.id().to_string()).collect();

    let mut reports = Vec::with_capacity(metrics.len());
    for &metric in metrics {
        let matrix = strategy_for(metric, parallel).compute_matrix(&items);
        debug_assert_eq!(matrix.size(), index.len());
        db.write_matrix(metric, &ids, &matrix)?;
        tracing::info!(metric = %metric, size = matrix.size(), "wrote similarity matrix");
        reports.push(SimilarityReport {
            metric,
            size: matrix.size(),
        });
    }
    Ok(reports)
}

/// Run every stage from a catalog file
pub fn build(db: &Database, path: &Path, config: &RecommenderConfig) -> Result<BuildReport> {
    let import = import_catalog(db, path, config)?;
    let discretize = run_discretize(db)?;
    let combine = run_combine(db)?;
    let similarity = run_similarity(db, &Metric::ALL, config.similarity.parallel)?;

    Ok(BuildReport {
        import,
        discretize,
        combine,
        similarity,
    })
}

/// Top-k recommendations from a stored similarity stage
pub fn recommend(
    db: &Database,
    metric: Metric,
    query: &str,
    k: usize,
) -> Result<Vec<Recommendation>> {
    let (ids, matrix) = db.read_matrix(metric)?;
    let index = ItemIndex::new(ids)?;
    Recommender::new(&index, &matrix)?.recommend_scored(query, k)
}

/// Export a discretized or preprocessed stage as CSV
pub fn export_stage<W: Write>(
    db: &Database,
    stage: Stage,
    writer: W,
    config: &RecommenderConfig,
) -> Result<usize> {
    match stage {
        Stage::Discretized => {
            let items: Vec<DiscretizedItem> = db.read_items(stage)?;
            catalog::write_discretized(writer, &items, &config.catalog)?;
            Ok(items.len())
        }
        Stage::Preprocessed => {
            let items: Vec<CombinedItem> = db.read_items(stage)?;
            catalog::write_combined(writer, &items, &config.catalog)?;
            Ok(items.len())
        }
        other => Err(crate::error::GamerecError::invalid_value(
            "export stage (expected discretized or preprocessed)",
            other,
        )),
    }
}

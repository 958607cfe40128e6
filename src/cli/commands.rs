//! Main CLI commands enum and argument structures

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::parse::parse_metric;
use gamerec_core::db::Stage;
use gamerec_core::similarity::Metric;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new gamerec store
    Init,

    /// Import a catalog CSV as the raw stage
    Import(CatalogArgs),

    /// Bucket review percentages and counts (raw → discretized)
    Discretize,

    /// Combine genres and tags into one normalized string (discretized → preprocessed)
    Combine,

    /// Compute similarity matrices (preprocessed → similarity)
    Similarity(SimilarityArgs),

    /// Run every stage from a catalog CSV
    Build(CatalogArgs),

    /// Recommend the games most similar to a title
    Recommend(RecommendArgs),

    /// List the stages stored so far
    Stages,

    /// Export the discretized or preprocessed table as CSV
    Export(ExportArgs),
}

/// Arguments for commands that read a catalog file.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Path to the catalog CSV
    pub csv: PathBuf,
}

/// Arguments for the similarity command.
#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// Metric to compute
    #[arg(long, value_enum, default_value = "all")]
    pub metric: MetricChoice,
}

/// Arguments for the recommend command.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Title of the game to find neighbours for
    pub title: String,

    /// Number of recommendations (default from config)
    #[arg(short = 'k', long = "count")]
    pub count: Option<usize>,

    /// Similarity metric (default from config)
    #[arg(long, value_parser = parse_metric)]
    pub metric: Option<Metric>,
}

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Stage to export
    #[arg(value_enum)]
    pub stage: ExportStage,

    /// Output CSV path
    pub output: PathBuf,
}

/// Metric selection for the similarity command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricChoice {
    Cosine,
    Jaccard,
    All,
}

impl MetricChoice {
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            MetricChoice::Cosine => vec![Metric::Cosine],
            MetricChoice::Jaccard => vec![Metric::Jaccard],
            MetricChoice::All => Metric::ALL.to_vec(),
        }
    }
}

/// Stages that can be exported as CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportStage {
    Discretized,
    Preprocessed,
}

impl From<ExportStage> for Stage {
    fn from(stage: ExportStage) -> Self {
        match stage {
            ExportStage::Discretized => Stage::Discretized,
            ExportStage::Preprocessed => Stage::Preprocessed,
        }
    }
}

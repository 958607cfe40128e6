//! Single pipeline step commands: `discretize`, `combine`, `similarity`
//!
//! Each reads its input stage from the store and replaces its output stage.

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json};
use gamerec_core::discretize::Cutoffs;
use gamerec_core::error::Result;
use gamerec_core::pipeline::{self, CombineReport, DiscretizeReport, SimilarityReport};
use gamerec_core::records::header_line;
use gamerec_core::similarity::Metric;
use gamerec_core::store::Store;

fn format_cutoffs(cutoffs: Option<Cutoffs>) -> String {
    match cutoffs {
        Some(c) => format!("{}/{}/{}/{}", c.c20, c.c40, c.c60, c.c80),
        None => "none".to_string(),
    }
}

pub(crate) fn print_discretize_human(report: &DiscretizeReport) {
    println!(
        "Discretized {} items ({} dropped, {} malformed values)",
        report.items, report.dropped, report.malformed
    );
    println!("  popularity cutoffs: {}", format_cutoffs(report.cutoffs));
}

pub(crate) fn print_discretize_record(report: &DiscretizeReport) {
    println!(
        "S stage=\"discretized\" rows={} dropped={} malformed={} cutoffs={}",
        report.items,
        report.dropped,
        report.malformed,
        format_cutoffs(report.cutoffs)
    );
}

pub(crate) fn print_combine_human(report: &CombineReport) {
    println!(
        "Combined {} items ({} without genres or tags dropped)",
        report.items, report.dropped
    );
}

pub(crate) fn print_combine_record(report: &CombineReport) {
    println!(
        "S stage=\"preprocessed\" rows={} dropped={}",
        report.items, report.dropped
    );
}

pub(crate) fn print_similarity_human(reports: &[SimilarityReport]) {
    for report in reports {
        println!(
            "Computed {} similarity for {} items",
            report.metric, report.size
        );
    }
}

pub(crate) fn print_similarity_records(reports: &[SimilarityReport]) {
    for report in reports {
        println!(
            "S stage=\"{}\" rows={}",
            report.metric.stage_name(),
            report.size
        );
    }
}

/// Execute the discretize command
pub fn discretize(cli: &Cli, store: &Store) -> Result<()> {
    let report = pipeline::run_discretize(store.db())?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => {
            if !cli.quiet {
                print_discretize_human(&report);
            }
        },
        records => {
            println!("{}", header_line("discretize", store.root()));
            print_discretize_record(&report);
        }
    )
}

/// Execute the combine command
pub fn combine(cli: &Cli, store: &Store) -> Result<()> {
    let report = pipeline::run_combine(store.db())?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => {
            if !cli.quiet {
                print_combine_human(&report);
            }
        },
        records => {
            println!("{}", header_line("combine", store.root()));
            print_combine_record(&report);
        }
    )
}

/// Execute the similarity command
pub fn similarity(cli: &Cli, store: &Store, metrics: &[Metric]) -> Result<()> {
    let reports =
        pipeline::run_similarity(store.db(), metrics, store.config().similarity.parallel)?;

    output_by_format_result!(cli.format,
        json => { print_json(&reports) },
        human => {
            if !cli.quiet {
                print_similarity_human(&reports);
            }
        },
        records => {
            println!("{}", header_line("similarity", store.root()));
            print_similarity_records(&reports);
        }
    )
}

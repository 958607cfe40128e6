//! `gamerec build` command - run every stage from a catalog CSV

use std::path::Path;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json};
use crate::commands::steps;
use gamerec_core::error::Result;
use gamerec_core::pipeline;
use gamerec_core::records::header_line;
use gamerec_core::store::Store;

/// Execute the build command
pub fn execute(cli: &Cli, store: &Store, csv: &Path) -> Result<()> {
    let report = pipeline::build(store.db(), csv, store.config())?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => {
            if !cli.quiet {
                println!("Imported {} rows from {}", report.import.rows, csv.display());
                steps::print_discretize_human(&report.discretize);
                steps::print_combine_human(&report.combine);
                steps::print_similarity_human(&report.similarity);
            }
        },
        records => {
            println!("{}", header_line("build", store.root()));
            println!("S stage=\"raw\" rows={}", report.import.rows);
            steps::print_discretize_record(&report.discretize);
            steps::print_combine_record(&report.combine);
            steps::print_similarity_records(&report.similarity);
        }
    )
}

//! `gamerec import` command - read a catalog CSV into the raw stage

use std::path::Path;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json};
use gamerec_core::error::Result;
use gamerec_core::pipeline;
use gamerec_core::records::header_line;
use gamerec_core::store::Store;

/// Execute the import command
pub fn execute(cli: &Cli, store: &Store, csv: &Path) -> Result<()> {
    let report = pipeline::import_catalog(store.db(), csv, store.config())?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => {
            if !cli.quiet {
                println!("Imported {} rows from {}", report.rows, csv.display());
            }
        },
        records => {
            println!("{}", header_line("import", store.root()));
            println!("S stage=\"raw\" rows={}", report.rows);
        }
    )
}

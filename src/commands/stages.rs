//! `gamerec stages` command - list stored stages

use chrono::Local;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json};
use gamerec_core::error::Result;
use gamerec_core::records::header_line;
use gamerec_core::store::Store;

/// Execute the stages command
pub fn execute(cli: &Cli, store: &Store) -> Result<()> {
    let stages = store.db().list_stages()?;

    output_by_format_result!(cli.format,
        json => { print_json(&stages) },
        human => {
            if stages.is_empty() {
                if !cli.quiet {
                    println!("No stages built yet. Run `gamerec build <catalog.csv>`.");
                }
            } else {
                for info in &stages {
                    println!(
                        "{:<20} {:>8} rows  {}",
                        info.stage.name(),
                        info.rows,
                        info.written_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }
        },
        records => {
            println!("{}", header_line("stages", store.root()));
            for info in &stages {
                println!(
                    "S stage=\"{}\" rows={} written_at={}",
                    info.stage.name(),
                    info.rows,
                    info.written_at.to_rfc3339()
                );
            }
        }
    )
}

//! `gamerec export` command - write a stage table as CSV

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use gamerec_core::db::Stage;
use gamerec_core::error::Result;
use gamerec_core::pipeline;
use gamerec_core::records::header_line;
use gamerec_core::store::Store;

/// Execute the export command
pub fn execute(cli: &Cli, store: &Store, stage: Stage, output: &Path) -> Result<()> {
    // fail before creating the output file
    if store.db().stage_info(stage)?.is_none() {
        return Err(stage.missing());
    }

    let writer = BufWriter::new(File::create(output)?);
    let rows = pipeline::export_stage(store.db(), stage, writer, store.config())?;

    output_by_format_result!(cli.format,
        json => {
            print_json_status("ok", &[
                ("stage", serde_json::json!(stage)),
                ("rows", serde_json::json!(rows)),
                ("path", serde_json::json!(output.display().to_string())),
            ])
        },
        human => {
            if !cli.quiet {
                println!("Exported {} {} rows to {}", rows, stage, output.display());
            }
        },
        records => {
            println!("{}", header_line("export", store.root()));
            println!("S stage=\"{}\" rows={} path={}", stage, rows, output.display());
        }
    )
}

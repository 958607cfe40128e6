//! `gamerec init` command - create a new store
//!
//! Idempotent: running it again keeps the existing configuration and stages.

use std::path::Path;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use gamerec_core::error::Result;
use gamerec_core::records::header_line;
use gamerec_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = if let Some(path) = cli.store.as_ref() {
        Store::init_at(&resolve_store_path(root, path))?
    } else {
        Store::init(root)?
    };

    output_by_format_result!(cli.format,
        json => {
            print_json_status("ok", &[
                ("store", serde_json::json!(store.root().display().to_string())),
                ("message", serde_json::json!("Store initialized")),
            ])
        },
        human => {
            if !cli.quiet {
                println!("Initialized gamerec store at {}", store.root().display());
                println!();
                println!("Run `gamerec build <catalog.csv>` to compute recommendations.");
            }
        },
        records => {
            println!("{} status=ok", header_line("init", store.root()));
        }
    )
}

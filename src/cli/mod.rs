//! CLI argument parsing for gamerec
//!
//! Uses clap derive. Supports global flags: --root, --store, --format,
//! --quiet, --verbose, --log-level, --log-json

pub mod commands;
pub mod format;
pub mod parse;
pub mod paths;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use gamerec_core::format::OutputFormat;
use parse::parse_format;

/// Gamerec - content-based game recommendations from a Steam-style catalog
#[derive(Parser, Debug)]
#[command(name = "gamerec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (e.g. info, debug, gamerec_core=trace)
    #[arg(long, global = true, env = "GAMEREC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

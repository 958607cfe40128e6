//! `gamerec recommend` command - nearest games for a title
//!
//! An unknown title prints `None` and exits with the data error code.

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json};
use gamerec_core::error::{GamerecError, Result};
use gamerec_core::pipeline;
use gamerec_core::records::{escape_quotes, header_line};
use gamerec_core::similarity::Metric;
use gamerec_core::store::Store;

/// Sentinel printed for a title that is not in the catalog
const NOT_FOUND: &str = "None";

/// Execute the recommend command
pub fn execute(
    cli: &Cli,
    store: &Store,
    title: &str,
    count: Option<usize>,
    metric: Option<Metric>,
) -> Result<()> {
    let config = store.config();
    let k = count.unwrap_or(config.recommend.default_count);
    let metric = metric.unwrap_or(config.similarity.default_metric);

    let recommendations = match pipeline::recommend(store.db(), metric, title, k) {
        Ok(recommendations) => recommendations,
        Err(err @ GamerecError::UnknownItem { .. }) => {
            if cli.format == crate::cli::OutputFormat::Human {
                println!("{}", NOT_FOUND);
            }
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "query": title,
                "metric": metric,
                "count": k,
                "recommendations": recommendations,
            }))
        },
        human => {
            for rec in &recommendations {
                if cli.quiet {
                    println!("{}", rec.id);
                } else {
                    println!("{} ({:.3})", rec.id, rec.score);
                }
            }
        },
        records => {
            println!(
                "{} query=\"{}\" metric={} k={}",
                header_line("recommend", store.root()),
                escape_quotes(title),
                metric,
                k
            );
            for (rank, rec) in recommendations.iter().enumerate() {
                println!(
                    "R {} {:.6} \"{}\"",
                    rank + 1,
                    rec.score,
                    escape_quotes(&rec.id)
                );
            }
        }
    )
}

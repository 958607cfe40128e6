//! Command implementations for all gamerec commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{build, export, import, init, recommend, stages, steps};
use gamerec_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let cli = ctx.cli;
        let result = match self {
            Commands::Init => init::execute(cli, ctx.root),
            Commands::Import(args) => import::execute(cli, &ctx.discover_or_open_store()?, &args.csv),
            Commands::Discretize => steps::discretize(cli, &ctx.discover_or_open_store()?),
            Commands::Combine => steps::combine(cli, &ctx.discover_or_open_store()?),
            Commands::Similarity(args) => {
                steps::similarity(cli, &ctx.discover_or_open_store()?, &args.metric.metrics())
            }
            Commands::Build(args) => build::execute(cli, &ctx.discover_or_open_store()?, &args.csv),
            Commands::Recommend(args) => recommend::execute(
                cli,
                &ctx.discover_or_open_store()?,
                &args.title,
                args.count,
                args.metric,
            ),
            Commands::Stages => stages::execute(cli, &ctx.discover_or_open_store()?),
            Commands::Export(args) => export::execute(
                cli,
                &ctx.discover_or_open_store()?,
                args.stage.into(),
                &args.output,
            ),
        };

        tracing::debug!(elapsed = ?ctx.start.elapsed(), "command_complete");
        result
    }
}

use anyhow::Result;

use super::compile::cmd_compile;
use super::env::CliArgs;
use super::perform::cmd_perform;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Compile(args) => cmd_compile(args, ctx, cli.output).await,
        Commands::Perform(args) => cmd_perform(args, ctx, cli.output).await,
    }
}

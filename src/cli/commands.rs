use clap::Subcommand;

use super::compile::CompileArgs;
use super::perform::PerformArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Compile a gesture script into synchronized timelines and legacy actions
    Compile(CompileArgs),

    /// Perform a gesture script against the console endpoint
    Perform(PerformArgs),
}

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

/// Print a report: structured formats serialize it, human output uses `human`
pub fn emit<T, F>(format: OutputFormat, report: &T, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Human => human(report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to render JSON output")?
        ),
        OutputFormat::Yaml => print!(
            "{}",
            serde_yaml::to_string(report).context("Failed to render YAML output")?
        ),
    }
    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::context::CliContext;
use super::output::{emit, OutputFormat};
use crate::script::GestureScript;
use crate::target::{ConsoleTarget, TargetMode};

#[derive(Args, Clone, Debug)]
pub struct CompileArgs {
    /// Gesture script (YAML)
    pub script: PathBuf,

    /// Compile without legacy device handles; no composite list is recorded
    #[arg(long)]
    pub no_legacy: bool,
}

#[derive(Debug, Serialize)]
struct CompileReport {
    script: String,
    ticks: usize,
    devices: usize,
    actions: Value,
    composite: Vec<String>,
}

pub async fn cmd_compile(args: CompileArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let script = GestureScript::load(&args.script).await?;
    let legacy = ctx.config().target.legacy_devices && !args.no_legacy;
    let target = Arc::new(ConsoleTarget::new(TargetMode::Synchronized, legacy));

    let mut actions = ctx.actions(target);
    script.apply(&mut actions);
    let plan = actions.build().context("Gesture script is invalid")?;

    info!(
        script = %args.script.display(),
        config = %ctx.config_path().display(),
        ticks = plan.tick_count(),
        "Compiled gesture script"
    );

    let wire = plan.to_value().context("Failed to render actions payload")?;
    let report = CompileReport {
        script: args.script.display().to_string(),
        ticks: plan.tick_count(),
        devices: plan.sequences().len(),
        actions: wire["actions"].clone(),
        composite: plan
            .composite()
            .actions()
            .iter()
            .map(|gesture| gesture.to_string())
            .collect(),
    };

    emit(output, &report, |report| {
        println!("Script: {}", report.script);
        println!("Ticks: {} across {} device(s)", report.ticks, report.devices);
        println!();
        println!("Synchronized actions:");
        match serde_json::to_string_pretty(&report.actions) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("  <unrenderable: {}>", err),
        }
        println!();
        if report.composite.is_empty() {
            println!("Legacy composite: not recorded");
        } else {
            println!("Legacy composite:");
            for (index, gesture) in report.composite.iter().enumerate() {
                println!("  {:>3}. {}", index + 1, gesture);
            }
        }
    })
}

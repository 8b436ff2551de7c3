use std::path::PathBuf;
use std::sync::Arc;

use action_chain::{ActionError, PerformOutcome};
use anyhow::{Error, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::context::CliContext;
use super::output::{emit, OutputFormat};
use crate::script::GestureScript;
use crate::target::{ConsoleTarget, TargetMode};

#[derive(Args, Clone, Debug)]
pub struct PerformArgs {
    /// Gesture script (YAML)
    pub script: PathBuf,

    /// Endpoint does not advertise synchronized actions
    #[arg(long, conflicts_with = "reject_actions")]
    pub legacy_only: bool,

    /// Endpoint advertises synchronized actions but answers "unsupported command"
    #[arg(long)]
    pub reject_actions: bool,

    /// Endpoint exposes no legacy keyboard/mouse handles
    #[arg(long)]
    pub no_legacy: bool,
}

impl PerformArgs {
    fn mode(&self, synchronized: bool) -> TargetMode {
        if self.legacy_only || !synchronized {
            TargetMode::LegacyOnly
        } else if self.reject_actions {
            TargetMode::RejectActions
        } else {
            TargetMode::Synchronized
        }
    }
}

#[derive(Debug, Serialize)]
struct PerformReport {
    script: String,
    outcome: PerformOutcome,
    ticks: usize,
    transcript: Vec<String>,
}

pub async fn cmd_perform(args: PerformArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let script = GestureScript::load(&args.script).await?;
    let settings = &ctx.config().target;
    let mode = args.mode(settings.synchronized_actions);
    let legacy = settings.legacy_devices && !args.no_legacy;
    let target = Arc::new(ConsoleTarget::new(mode, legacy));

    let mut actions = ctx.actions(target.clone());
    script.apply(&mut actions);
    let outcome = actions.perform().await.map_err(|err| {
        let reason = failure_reason(&err);
        Error::new(err).context(format!("{} {}", reason, args.script.display()))
    })?;

    info!(?mode, ?outcome, ticks = actions.tick_count(), "Performed gesture script");

    let report = PerformReport {
        script: args.script.display().to_string(),
        outcome,
        ticks: actions.tick_count(),
        transcript: target.transcript(),
    };

    emit(output, &report, |report| {
        for line in &report.transcript {
            println!("{}", line);
        }
        let protocol = match report.outcome {
            PerformOutcome::Synchronized => "synchronized actions",
            PerformOutcome::Legacy => "legacy input devices",
        };
        println!("Performed {} tick(s) via {}", report.ticks, protocol);
    })
}

fn failure_reason(err: &ActionError) -> &'static str {
    if err.is_usage_error() {
        "Invalid gesture script"
    } else {
        "Endpoint failed to perform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(legacy_only: bool, reject_actions: bool) -> PerformArgs {
        PerformArgs {
            script: PathBuf::from("script.yaml"),
            legacy_only,
            reject_actions,
            no_legacy: false,
        }
    }

    #[test]
    fn flags_select_endpoint_mode() {
        assert_eq!(args(false, false).mode(true), TargetMode::Synchronized);
        assert_eq!(args(false, true).mode(true), TargetMode::RejectActions);
        assert_eq!(args(true, false).mode(true), TargetMode::LegacyOnly);
        assert_eq!(args(false, true).mode(false), TargetMode::LegacyOnly);
    }

    #[test]
    fn usage_errors_blame_the_script() {
        assert_eq!(
            failure_reason(&ActionError::ConflictingProtocolUsage),
            "Invalid gesture script"
        );
        assert_eq!(
            failure_reason(&ActionError::NoProtocolAvailable("none".into())),
            "Endpoint failed to perform"
        );
    }
}

//! Executes a built plan against the remote endpoint
//!
//! The synchronized command is attempted first when the endpoint advertises
//! it. An "unsupported command" answer replays the composite list once through
//! the legacy device handles; every other failure is returned unchanged.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::ActionError;
use crate::plan::ActionPlan;
use crate::ports::{ExecutionTarget, LegacyDevices, TargetCapabilities};

/// Which protocol ended up running the plan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformOutcome {
    Synchronized,
    Legacy,
}

pub struct Dispatcher<'a> {
    target: Option<&'a dyn ExecutionTarget>,
    capabilities: TargetCapabilities,
    legacy: Option<&'a LegacyDevices>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        target: Option<&'a dyn ExecutionTarget>,
        capabilities: TargetCapabilities,
        legacy: Option<&'a LegacyDevices>,
    ) -> Self {
        Self {
            target,
            capabilities,
            legacy,
        }
    }

    #[instrument(
        name = "actions.perform",
        skip_all,
        fields(
            ticks = plan.tick_count(),
            sequences = plan.sequences().len(),
            composite = plan.composite().len()
        )
    )]
    pub async fn perform(&self, plan: &ActionPlan) -> Result<PerformOutcome, ActionError> {
        let synchronized = self
            .target
            .filter(|_| self.capabilities.synchronized_actions);

        if let Some(target) = synchronized {
            match target.perform_sequences(plan.sequences()).await {
                Ok(()) => {
                    info!("Performed synchronized actions");
                    return Ok(PerformOutcome::Synchronized);
                }
                Err(err) if err.is_unsupported() => {
                    let Some(legacy) = self.legacy else {
                        return Err(err.into());
                    };
                    warn!(error = %err, "Synchronized actions rejected, falling back to legacy input devices");
                    return self.replay(legacy, plan).await;
                }
                Err(err) => return Err(err.into()),
            }
        }

        match self.legacy {
            Some(legacy) => self.replay(legacy, plan).await,
            None => Err(ActionError::NoProtocolAvailable(
                "endpoint exposes neither synchronized actions nor legacy input devices".into(),
            )),
        }
    }

    async fn replay(
        &self,
        legacy: &LegacyDevices,
        plan: &ActionPlan,
    ) -> Result<PerformOutcome, ActionError> {
        plan.composite().perform(legacy).await?;
        info!(actions = plan.composite().len(), "Performed legacy composite action");
        Ok(PerformOutcome::Legacy)
    }
}

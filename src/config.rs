//! Configuration loaded by the CLI

use action_chain::InteractionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pacing applied when gestures are compiled
    pub interaction: InteractionPolicy,
    pub target: TargetSettings,
}

/// Console endpoint behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Advertise the synchronized multi-device command
    pub synchronized_actions: bool,
    /// Expose legacy keyboard/mouse handles alongside it
    pub legacy_devices: bool,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            synchronized_actions: true,
            legacy_devices: true,
        }
    }
}

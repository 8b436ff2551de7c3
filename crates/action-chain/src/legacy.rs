//! Legacy composite action recording and replay

use tokio::time::sleep;
use tracing::debug;

use crate::errors::ActionError;
use crate::gesture::Gesture;
use crate::ports::LegacyDevices;

/// Device-less, strictly sequential list of legacy actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeAction {
    actions: Vec<Gesture>,
}

impl CompositeAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, gesture: Gesture) {
        self.actions.push(gesture);
    }

    pub fn actions(&self) -> &[Gesture] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replay every action in order through the legacy device handles
    pub async fn perform(&self, devices: &LegacyDevices) -> Result<(), ActionError> {
        for (step, gesture) in self.actions.iter().enumerate() {
            debug!(step, gesture = %gesture, "Replaying legacy action");
            replay(gesture, devices).await?;
        }
        Ok(())
    }
}

async fn replay(gesture: &Gesture, devices: &LegacyDevices) -> Result<(), ActionError> {
    match gesture {
        Gesture::Click => devices.mouse()?.click(None).await?,
        Gesture::ContextClick => devices.mouse()?.context_click(None).await?,
        Gesture::ClickAndHold => devices.mouse()?.mouse_down(None).await?,
        Gesture::Release => devices.mouse()?.mouse_up(None).await?,
        Gesture::MoveToElement { target, x, y } => {
            devices.mouse()?.mouse_move(Some(target), *x, *y).await?
        }
        Gesture::MoveByOffset { x, y } => devices.mouse()?.mouse_move(None, *x, *y).await?,
        Gesture::KeyDown(key) => devices.keyboard()?.press_key(key).await?,
        Gesture::KeyUp(key) => devices.keyboard()?.release_key(key).await?,
        Gesture::SendKeys(keys) => devices.keyboard()?.send_keys(keys).await?,
        // the single-stream protocol has no pause command
        Gesture::Pause(duration) => sleep(*duration).await,
    }
    Ok(())
}

/// Records gestures for the legacy protocol when the target exposes device handles
#[derive(Debug, Clone, Default)]
pub struct LegacyRecorder {
    devices: Option<LegacyDevices>,
    composite: CompositeAction,
}

impl LegacyRecorder {
    pub fn new(devices: Option<LegacyDevices>) -> Self {
        Self {
            devices: devices.filter(|devices| !devices.is_empty()),
            composite: CompositeAction::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.devices.is_some()
    }

    pub fn record(&mut self, gesture: Gesture) {
        if self.is_active() {
            self.composite.add(gesture);
        }
    }

    pub fn composite(&self) -> &CompositeAction {
        &self.composite
    }

    pub fn devices(&self) -> Option<&LegacyDevices> {
        self.devices.as_ref()
    }
}

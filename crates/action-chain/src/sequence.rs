//! Per-device timeline of modern-protocol actions

use crate::device::InputDevice;
use crate::interaction::Interaction;

/// Ordered actions for one device, one entry per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    device: InputDevice,
    actions: Vec<Interaction>,
}

impl Sequence {
    /// A timeline that starts `ticks` idle steps in, in sync with existing devices
    pub(crate) fn padded(device: InputDevice, ticks: usize) -> Self {
        Self {
            device,
            actions: vec![Interaction::idle(); ticks],
        }
    }

    pub(crate) fn push(&mut self, interaction: Interaction) {
        self.actions.push(interaction);
    }

    pub fn device(&self) -> &InputDevice {
        &self.device
    }

    pub fn actions(&self) -> &[Interaction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

//! Tick coordination across device timelines

use std::collections::{HashMap, HashSet};

use actionchain_core_types::DeviceId;
use tracing::debug;

use crate::device::InputDevice;
use crate::errors::ActionError;
use crate::interaction::{DeviceAction, Interaction};
use crate::sequence::Sequence;

/// Owns every device timeline and keeps them the same length
///
/// Timelines are created lazily on a device's first tick and kept in creation
/// order so the wire payload is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TickCoordinator {
    sequences: Vec<Sequence>,
    index: HashMap<DeviceId, usize>,
    ticks: usize,
}

impl TickCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one synchronized step
    ///
    /// Devices in the batch receive their action; every other known device
    /// receives a zero-length pause afterwards. A batch naming the same device
    /// twice is rejected before anything is appended.
    pub fn tick(&mut self, batch: Vec<DeviceAction>) -> Result<(), ActionError> {
        let mut seen: HashSet<DeviceId> = HashSet::with_capacity(batch.len());
        for action in &batch {
            if !seen.insert(action.device.id().clone()) {
                return Err(ActionError::DuplicateDeviceInTick(describe_batch(&batch)));
            }
        }

        for action in batch {
            let slot = self.slot_for(&action.device);
            self.sequences[slot].push(action.interaction);
        }

        // empty batches before the first timeline are not ticks
        if self.sequences.is_empty() {
            return Ok(());
        }

        for sequence in &mut self.sequences {
            if !seen.contains(sequence.device().id()) {
                sequence.push(Interaction::idle());
            }
        }

        self.ticks += 1;
        debug!(
            tick = self.ticks,
            devices = self.sequences.len(),
            active = seen.len(),
            "Appended tick"
        );
        Ok(())
    }

    /// Number of completed ticks; the length of every timeline.
    /// Empty batches before the first timeline exists do not count.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn sequence(&self, device: &InputDevice) -> Option<&Sequence> {
        self.index
            .get(device.id())
            .map(|slot| &self.sequences[*slot])
    }

    fn slot_for(&mut self, device: &InputDevice) -> usize {
        if let Some(slot) = self.index.get(device.id()) {
            return *slot;
        }

        debug!(device = %device, padding = self.ticks, "Registering device timeline");
        let slot = self.sequences.len();
        self.sequences
            .push(Sequence::padded(device.clone(), self.ticks));
        self.index.insert(device.id().clone(), slot);
        slot
    }
}

fn describe_batch(batch: &[DeviceAction]) -> String {
    let entries: Vec<String> = batch.iter().map(|action| action.to_string()).collect();
    format!("[{}]", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{KeyboardDevice, PointerDevice, PointerKind};
    use std::time::Duration;

    fn assert_aligned(coordinator: &TickCoordinator) {
        for sequence in coordinator.sequences() {
            assert_eq!(sequence.len(), coordinator.ticks(), "{}", sequence.device());
        }
    }

    #[test]
    fn idle_devices_are_padded_after_each_tick() {
        let mouse = PointerDevice::new(PointerKind::Mouse, Some("mouse"));
        let keys = KeyboardDevice::new(Some("keys"));
        let mut coordinator = TickCoordinator::new();

        coordinator
            .tick(vec![mouse.pointer_down(0), keys.key_down('a')])
            .unwrap();
        assert_aligned(&coordinator);

        coordinator.tick(vec![mouse.pointer_up(0)]).unwrap();
        assert_aligned(&coordinator);

        let key_timeline = coordinator.sequence(keys.device()).unwrap();
        assert_eq!(key_timeline.actions()[1], Interaction::idle());
    }

    #[test]
    fn duplicate_device_rejects_whole_batch() {
        let mouse = PointerDevice::new(PointerKind::Mouse, None);
        let keys = KeyboardDevice::new(None);
        let mut coordinator = TickCoordinator::new();
        coordinator.tick(vec![keys.key_down('x')]).unwrap();

        let err = coordinator
            .tick(vec![mouse.pointer_down(0), mouse.pointer_up(0)])
            .unwrap_err();

        assert!(matches!(err, ActionError::DuplicateDeviceInTick(_)));
        assert_eq!(coordinator.ticks(), 1);
        assert!(coordinator.sequence(mouse.device()).is_none());
        assert_aligned(&coordinator);
    }

    #[test]
    fn late_device_starts_in_sync() {
        let mouse = PointerDevice::new(PointerKind::Mouse, None);
        let pen = PointerDevice::new(PointerKind::Pen, None);
        let mut coordinator = TickCoordinator::new();
        for _ in 0..3 {
            coordinator
                .tick(vec![mouse.pause(Duration::from_millis(5))])
                .unwrap();
        }

        coordinator
            .tick(vec![pen.pointer_down(0), mouse.pointer_down(0)])
            .unwrap();

        let pen_timeline = coordinator.sequence(pen.device()).unwrap();
        assert_eq!(pen_timeline.len(), 4);
        assert!(pen_timeline.actions()[..3]
            .iter()
            .all(|action| *action == Interaction::idle()));
        assert_eq!(
            pen_timeline.actions()[3],
            Interaction::PointerDown { button: 0 }
        );
        assert_aligned(&coordinator);
    }

    #[test]
    fn empty_batch_pads_everyone() {
        let keys = KeyboardDevice::new(None);
        let mut coordinator = TickCoordinator::new();
        coordinator.tick(vec![keys.key_down('a')]).unwrap();
        coordinator.tick(Vec::new()).unwrap();

        assert_eq!(coordinator.ticks(), 2);
        assert_aligned(&coordinator);
    }

    #[test]
    fn empty_first_batch_adds_no_step() {
        let mouse = PointerDevice::new(PointerKind::Mouse, None);
        let mut coordinator = TickCoordinator::new();
        coordinator.tick(Vec::new()).unwrap();
        assert_eq!(coordinator.ticks(), 0);

        coordinator
            .tick(vec![mouse.pointer_down(0)])
            .unwrap();

        let timeline = coordinator.sequence(mouse.device()).unwrap();
        assert_eq!(timeline.actions(), &[Interaction::PointerDown { button: 0 }]);
        assert_eq!(coordinator.ticks(), 1);
    }
}

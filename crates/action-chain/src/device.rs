//! Virtual input devices and the registry that owns their identities

use actionchain_core_types::DeviceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::interaction::{DeviceAction, Interaction, Origin};

pub const DEFAULT_MOUSE_NAME: &str = "default mouse";
pub const DEFAULT_KEYBOARD_NAME: &str = "default keyboard";

/// Pointer flavours understood by the synchronized protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Pointer(PointerKind),
    Key,
}

/// Identity of a virtual input device
///
/// Equality and hashing use the generated [`DeviceId`] only, so two devices
/// sharing a name remain distinct.
#[derive(Debug, Clone)]
pub struct InputDevice {
    id: DeviceId,
    name: Option<String>,
    kind: DeviceKind,
    primary: bool,
}

impl InputDevice {
    fn new(kind: DeviceKind, name: Option<&str>, primary: bool) -> Self {
        Self {
            id: DeviceId::new(),
            name: name.map(str::to_string),
            kind,
            primary,
        }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Source id used on the wire: the name when present, the identity otherwise
    pub fn wire_id(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.0.clone())
    }

    /// Any device may idle for a tick
    pub fn pause(&self, duration: Duration) -> DeviceAction {
        DeviceAction::new(self.clone(), Interaction::Pause { duration })
    }
}

impl PartialEq for InputDevice {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InputDevice {}

impl Hash for InputDevice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for InputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A pointer source: creates pointer actions bound to itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointerDevice {
    device: InputDevice,
    kind: PointerKind,
}

impl PointerDevice {
    /// A non-primary pointer
    pub fn new(kind: PointerKind, name: Option<&str>) -> Self {
        Self {
            device: InputDevice::new(DeviceKind::Pointer(kind), name, false),
            kind,
        }
    }

    fn primary(kind: PointerKind, name: &str) -> Self {
        Self {
            device: InputDevice::new(DeviceKind::Pointer(kind), Some(name), true),
            kind,
        }
    }

    pub fn device(&self) -> &InputDevice {
        &self.device
    }

    pub fn pointer_kind(&self) -> PointerKind {
        self.kind
    }

    pub fn pointer_down(&self, button: u32) -> DeviceAction {
        DeviceAction::new(self.device.clone(), Interaction::PointerDown { button })
    }

    pub fn pointer_up(&self, button: u32) -> DeviceAction {
        DeviceAction::new(self.device.clone(), Interaction::PointerUp { button })
    }

    pub fn pointer_move(&self, duration: Duration, origin: Origin, x: i32, y: i32) -> DeviceAction {
        DeviceAction::new(
            self.device.clone(),
            Interaction::PointerMove {
                duration,
                origin,
                x,
                y,
            },
        )
    }

    pub fn pause(&self, duration: Duration) -> DeviceAction {
        self.device.pause(duration)
    }
}

/// A key-input source: creates key actions bound to itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardDevice {
    device: InputDevice,
}

impl KeyboardDevice {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            device: InputDevice::new(DeviceKind::Key, name, false),
        }
    }

    pub fn device(&self) -> &InputDevice {
        &self.device
    }

    pub fn key_down(&self, value: char) -> DeviceAction {
        DeviceAction::new(self.device.clone(), Interaction::KeyDown { value })
    }

    pub fn key_up(&self, value: char) -> DeviceAction {
        DeviceAction::new(self.device.clone(), Interaction::KeyUp { value })
    }

    pub fn pause(&self, duration: Duration) -> DeviceAction {
        self.device.pause(duration)
    }
}

/// The two default devices of one builder, and the factory for any others
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    default_pointer: PointerDevice,
    default_keyboard: KeyboardDevice,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            default_pointer: PointerDevice::primary(PointerKind::Mouse, DEFAULT_MOUSE_NAME),
            default_keyboard: KeyboardDevice::new(Some(DEFAULT_KEYBOARD_NAME)),
        }
    }

    pub fn default_pointer(&self) -> &PointerDevice {
        &self.default_pointer
    }

    pub fn default_keyboard(&self) -> &KeyboardDevice {
        &self.default_keyboard
    }

    /// Create an additional pointer; only the default pointer is primary
    pub fn pointer(&self, kind: PointerKind, name: Option<&str>) -> PointerDevice {
        PointerDevice::new(kind, name)
    }

    pub fn keyboard(&self, name: Option<&str>) -> KeyboardDevice {
        KeyboardDevice::new(name)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_devices_are_distinct() {
        let a = PointerDevice::new(PointerKind::Mouse, Some("finger"));
        let b = PointerDevice::new(PointerKind::Mouse, Some("finger"));
        assert_ne!(a.device(), b.device());
        assert_eq!(a.device(), &a.device().clone());
    }

    #[test]
    fn registry_has_single_primary_pointer() {
        let registry = DeviceRegistry::new();
        let pen = registry.pointer(PointerKind::Pen, Some("pen"));
        let extra_keys = registry.keyboard(None);

        assert!(registry.default_pointer().device().is_primary());
        assert!(!registry.default_keyboard().device().is_primary());
        assert!(!pen.device().is_primary());
        assert!(!extra_keys.device().is_primary());
        assert_eq!(pen.pointer_kind(), PointerKind::Pen);
        assert_eq!(
            registry.default_pointer().device().name(),
            Some(DEFAULT_MOUSE_NAME)
        );
    }

    #[test]
    fn unnamed_devices_use_identity_on_the_wire() {
        let keyboard = KeyboardDevice::new(None);
        assert_eq!(keyboard.device().wire_id(), keyboard.device().id().0);
    }
}

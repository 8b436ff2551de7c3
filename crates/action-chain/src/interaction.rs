//! Modern-protocol actions bound to input devices

use actionchain_core_types::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::device::InputDevice;

/// Opaque handle to a remote element, only ever used as a move origin or legacy target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    id: ElementId,
}

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(id),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element:{}", self.id)
    }
}

/// Mouse buttons and their protocol button numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn as_arg(self) -> u32 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Reference frame for pointer move offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Offsets are absolute viewport coordinates
    Viewport,

    /// Offsets are relative to the current pointer position
    Pointer,

    /// Offsets are relative to the element's top-left corner
    Element(ElementRef),
}

/// A single modern-protocol action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    PointerDown {
        button: u32,
    },
    PointerUp {
        button: u32,
    },
    PointerMove {
        duration: Duration,
        origin: Origin,
        x: i32,
        y: i32,
    },
    KeyDown {
        value: char,
    },
    KeyUp {
        value: char,
    },
    Pause {
        duration: Duration,
    },
}

impl Interaction {
    /// Padding placed on devices idle during a tick
    pub fn idle() -> Self {
        Interaction::Pause {
            duration: Duration::ZERO,
        }
    }
}

/// An interaction bound to the device that performs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAction {
    pub device: InputDevice,
    pub interaction: Interaction,
}

impl DeviceAction {
    pub fn new(device: InputDevice, interaction: Interaction) -> Self {
        Self {
            device,
            interaction,
        }
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.device, self.interaction)
    }
}

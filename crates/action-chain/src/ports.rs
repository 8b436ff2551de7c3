//! Interfaces consumed from the automation endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::{ActionError, TargetError};
use crate::interaction::ElementRef;
use crate::keys::KeyInput;
use crate::sequence::Sequence;

/// Capability descriptor read once when a builder is created
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCapabilities {
    /// The endpoint accepts multi-device synchronized sequences
    pub synchronized_actions: bool,
}

/// The remote end actions are performed against
#[async_trait]
pub trait ExecutionTarget: Send + Sync {
    fn capabilities(&self) -> TargetCapabilities;

    /// Run every timeline in one synchronized command.
    /// Endpoints without the command answer [`TargetError::UnsupportedCommand`].
    async fn perform_sequences(&self, sequences: &[Sequence]) -> Result<(), TargetError>;

    /// Directly addressable keyboard/mouse handles for the legacy protocol
    fn legacy_devices(&self) -> Option<LegacyDevices> {
        None
    }
}

/// Legacy single-stream keyboard
#[async_trait]
pub trait Keyboard: Send + Sync {
    async fn send_keys(&self, keys: &[KeyInput]) -> Result<(), TargetError>;
    async fn press_key(&self, key: &KeyInput) -> Result<(), TargetError>;
    async fn release_key(&self, key: &KeyInput) -> Result<(), TargetError>;
}

/// Legacy single-stream mouse; `None` targets mean the current location
#[async_trait]
pub trait Mouse: Send + Sync {
    async fn click(&self, target: Option<&ElementRef>) -> Result<(), TargetError>;
    async fn context_click(&self, target: Option<&ElementRef>) -> Result<(), TargetError>;
    async fn mouse_down(&self, target: Option<&ElementRef>) -> Result<(), TargetError>;
    async fn mouse_up(&self, target: Option<&ElementRef>) -> Result<(), TargetError>;
    async fn mouse_move(
        &self,
        target: Option<&ElementRef>,
        x_offset: i32,
        y_offset: i32,
    ) -> Result<(), TargetError>;
}

/// Legacy device handles; either may be absent
#[derive(Clone, Default)]
pub struct LegacyDevices {
    keyboard: Option<Arc<dyn Keyboard>>,
    mouse: Option<Arc<dyn Mouse>>,
}

impl LegacyDevices {
    pub fn new(keyboard: Option<Arc<dyn Keyboard>>, mouse: Option<Arc<dyn Mouse>>) -> Self {
        Self { keyboard, mouse }
    }

    pub fn is_empty(&self) -> bool {
        self.keyboard.is_none() && self.mouse.is_none()
    }

    pub fn keyboard(&self) -> Result<&dyn Keyboard, ActionError> {
        self.keyboard
            .as_deref()
            .ok_or_else(|| ActionError::NoProtocolAvailable("legacy keyboard handle missing".into()))
    }

    pub fn mouse(&self) -> Result<&dyn Mouse, ActionError> {
        self.mouse
            .as_deref()
            .ok_or_else(|| ActionError::NoProtocolAvailable("legacy mouse handle missing".into()))
    }
}

impl fmt::Debug for LegacyDevices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyDevices")
            .field("keyboard", &self.keyboard.is_some())
            .field("mouse", &self.mouse.is_some())
            .finish()
    }
}

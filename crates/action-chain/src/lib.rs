//! Gesture-sequence builder and dual-protocol action translator
//!
//! This crate turns fluent gesture calls into two parallel histories:
//! - Per-device timelines for the synchronized multi-device actions protocol
//! - A composite, device-less action list for legacy single-stream endpoints
//!
//! [`Actions`] is the entry point. [`Actions::perform`] tries the synchronized
//! protocol first and replays the composite list once when the endpoint
//! reports the command as unsupported.

pub mod actions;
pub mod device;
pub mod dispatcher;
pub mod errors;
pub mod gesture;
pub mod interaction;
pub mod keys;
pub mod legacy;
pub mod plan;
pub mod policy;
pub mod ports;
pub mod sequence;
pub mod tick;
mod wire;

pub use actions::Actions;
pub use device::{DeviceKind, DeviceRegistry, InputDevice, KeyboardDevice, PointerDevice, PointerKind};
pub use dispatcher::{Dispatcher, PerformOutcome};
pub use errors::{ActionError, ActionResult, TargetError};
pub use gesture::Gesture;
pub use interaction::{DeviceAction, ElementRef, Interaction, MouseButton, Origin};
pub use keys::{Key, KeyInput};
pub use legacy::{CompositeAction, LegacyRecorder};
pub use plan::ActionPlan;
pub use policy::InteractionPolicy;
pub use ports::{ExecutionTarget, Keyboard, LegacyDevices, Mouse, TargetCapabilities};
pub use sequence::Sequence;
pub use tick::TickCoordinator;

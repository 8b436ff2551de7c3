//! actionchain CLI library
//!
//! Exposes modules for integration testing

pub mod cli;
pub mod config;
pub mod script;
pub mod target;

pub use config::{Config, TargetSettings};
pub use script::{GestureScript, KeyValue, ScriptError, ScriptStep};
pub use target::{ConsoleDevices, ConsoleTarget, TargetMode};

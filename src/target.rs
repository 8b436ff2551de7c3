//! Console execution target
//!
//! Stands in for a remote automation endpoint: every command it receives is
//! logged and appended to a transcript instead of driving a browser.

use std::sync::Arc;

use action_chain::{
    ElementRef, ExecutionTarget, Interaction, KeyInput, Keyboard, LegacyDevices, Mouse, Origin,
    Sequence, TargetCapabilities, TargetError,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

/// How the console endpoint answers the synchronized command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Advertise and accept synchronized actions
    Synchronized,
    /// Advertise synchronized actions but answer "unsupported command"
    RejectActions,
    /// Do not advertise synchronized actions
    LegacyOnly,
}

pub struct ConsoleTarget {
    mode: TargetMode,
    legacy: bool,
    devices: Arc<ConsoleDevices>,
}

impl ConsoleTarget {
    pub fn new(mode: TargetMode, legacy: bool) -> Self {
        Self {
            mode,
            legacy,
            devices: Arc::new(ConsoleDevices::default()),
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.devices.transcript()
    }
}

#[async_trait]
impl ExecutionTarget for ConsoleTarget {
    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            synchronized_actions: self.mode != TargetMode::LegacyOnly,
        }
    }

    async fn perform_sequences(&self, sequences: &[Sequence]) -> Result<(), TargetError> {
        if self.mode == TargetMode::RejectActions {
            self.devices.log("actions: rejected");
            return Err(TargetError::UnsupportedCommand("perform actions".into()));
        }

        for sequence in sequences {
            let steps: Vec<String> = sequence.actions().iter().map(describe).collect();
            self.devices.log(format!(
                "actions: {} [{}]",
                sequence.device().wire_id(),
                steps.join(", ")
            ));
        }
        Ok(())
    }

    fn legacy_devices(&self) -> Option<LegacyDevices> {
        if !self.legacy {
            return None;
        }
        let keyboard: Arc<dyn Keyboard> = self.devices.clone();
        let mouse: Arc<dyn Mouse> = self.devices.clone();
        Some(LegacyDevices::new(Some(keyboard), Some(mouse)))
    }
}

/// Legacy keyboard and mouse that write to the shared transcript
#[derive(Default)]
pub struct ConsoleDevices {
    transcript: Mutex<Vec<String>>,
}

impl ConsoleDevices {
    fn log(&self, line: impl Into<String>) {
        let line = line.into();
        info!(command = %line, "Console endpoint");
        self.transcript.lock().push(line);
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().clone()
    }
}

#[async_trait]
impl Keyboard for ConsoleDevices {
    async fn send_keys(&self, keys: &[KeyInput]) -> Result<(), TargetError> {
        let keys: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
        self.log(format!("keyboard: send_keys {}", keys.join(" ")));
        Ok(())
    }

    async fn press_key(&self, key: &KeyInput) -> Result<(), TargetError> {
        self.log(format!("keyboard: press {}", key));
        Ok(())
    }

    async fn release_key(&self, key: &KeyInput) -> Result<(), TargetError> {
        self.log(format!("keyboard: release {}", key));
        Ok(())
    }
}

#[async_trait]
impl Mouse for ConsoleDevices {
    async fn click(&self, target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.log(format!("mouse: click {}", at(target)));
        Ok(())
    }

    async fn context_click(&self, target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.log(format!("mouse: context_click {}", at(target)));
        Ok(())
    }

    async fn mouse_down(&self, target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.log(format!("mouse: down {}", at(target)));
        Ok(())
    }

    async fn mouse_up(&self, target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.log(format!("mouse: up {}", at(target)));
        Ok(())
    }

    async fn mouse_move(
        &self,
        target: Option<&ElementRef>,
        x_offset: i32,
        y_offset: i32,
    ) -> Result<(), TargetError> {
        self.log(format!("mouse: move {} {:+} {:+}", at(target), x_offset, y_offset));
        Ok(())
    }
}

fn at(target: Option<&ElementRef>) -> String {
    match target {
        Some(element) => element.to_string(),
        None => "here".to_string(),
    }
}

fn describe(interaction: &Interaction) -> String {
    match interaction {
        Interaction::PointerDown { button } => format!("down({})", button),
        Interaction::PointerUp { button } => format!("up({})", button),
        Interaction::PointerMove {
            duration,
            origin,
            x,
            y,
        } => {
            let origin = match origin {
                Origin::Viewport => "viewport".to_string(),
                Origin::Pointer => "pointer".to_string(),
                Origin::Element(element) => element.to_string(),
            };
            format!("move({}, {}, {}, {}ms)", origin, x, y, duration.as_millis())
        }
        Interaction::KeyDown { value } => format!("key_down({})", codepoint(*value)),
        Interaction::KeyUp { value } => format!("key_up({})", codepoint(*value)),
        Interaction::Pause { duration } => format!("pause({}ms)", duration.as_millis()),
    }
}

fn codepoint(value: char) -> String {
    if value.is_control() || ('\u{E000}'..='\u{F8FF}').contains(&value) {
        format!("U+{:04X}", value as u32)
    } else {
        format!("{:?}", value)
    }
}

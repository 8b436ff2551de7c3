//! YAML gesture scripts
//!
//! A script is a list of steps, each naming a builder gesture:
//!
//! ```yaml
//! steps:
//!   - action: click
//!     on: submit
//!   - action: key_down
//!     value: { key: shift }
//!   - action: send_keys
//!     keys: ["hello", { key: enter }]
//! ```

use std::path::Path;
use std::time::Duration;

use action_chain::{Actions, ElementRef, Key, KeyInput};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("script {0} has no steps")]
    Empty(String),
}

/// Literal text or a named key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Named { key: Key },
    Text(String),
}

impl From<&KeyValue> for KeyInput {
    fn from(value: &KeyValue) -> Self {
        match value {
            KeyValue::Named { key } => KeyInput::Key(*key),
            KeyValue::Text(text) => KeyInput::Text(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Click {
        #[serde(default)]
        on: Option<String>,
    },
    DoubleClick {
        #[serde(default)]
        on: Option<String>,
    },
    ContextClick {
        #[serde(default)]
        on: Option<String>,
    },
    ClickAndHold {
        #[serde(default)]
        on: Option<String>,
    },
    Release {
        #[serde(default)]
        on: Option<String>,
    },
    MoveToElement {
        element: String,
        #[serde(default)]
        x: Option<i32>,
        #[serde(default)]
        y: Option<i32>,
    },
    MoveByOffset {
        x: i32,
        y: i32,
    },
    KeyDown {
        value: KeyValue,
        #[serde(default)]
        on: Option<String>,
    },
    KeyUp {
        value: KeyValue,
        #[serde(default)]
        on: Option<String>,
    },
    SendKeys {
        keys: Vec<KeyValue>,
        #[serde(default)]
        to: Option<String>,
    },
    DragAndDrop {
        source: String,
        target: String,
    },
    DragAndDropBy {
        source: String,
        x: i32,
        y: i32,
    },
    Pause {
        ms: u64,
    },
}

impl ScriptStep {
    /// Feed this step to the builder; usage errors are deferred by the builder
    #[allow(deprecated)]
    pub fn apply(&self, actions: &mut Actions) {
        match self {
            ScriptStep::Click { on } => match element(on) {
                Some(target) => actions.click_on(&target),
                None => actions.click(),
            },
            ScriptStep::DoubleClick { on } => match element(on) {
                Some(target) => actions.double_click_on(&target),
                None => actions.double_click(),
            },
            ScriptStep::ContextClick { on } => match element(on) {
                Some(target) => actions.context_click_on(&target),
                None => actions.context_click(),
            },
            ScriptStep::ClickAndHold { on } => match element(on) {
                Some(target) => actions.click_and_hold_on(&target),
                None => actions.click_and_hold(),
            },
            ScriptStep::Release { on } => match element(on) {
                Some(target) => actions.release_on(&target),
                None => actions.release(),
            },
            ScriptStep::MoveToElement { element, x, y } => {
                let target = ElementRef::new(element.as_str());
                if x.is_none() && y.is_none() {
                    actions.move_to_element(&target)
                } else {
                    let (default_x, default_y) = actions.policy().element_offset();
                    actions.move_to_element_with_offset(
                        &target,
                        x.unwrap_or(default_x),
                        y.unwrap_or(default_y),
                    )
                }
            }
            ScriptStep::MoveByOffset { x, y } => actions.move_by_offset(*x, *y),
            ScriptStep::KeyDown { value, on } => match element(on) {
                Some(target) => actions.key_down_on(&target, KeyInput::from(value)),
                None => actions.key_down(KeyInput::from(value)),
            },
            ScriptStep::KeyUp { value, on } => match element(on) {
                Some(target) => actions.key_up_on(&target, KeyInput::from(value)),
                None => actions.key_up(KeyInput::from(value)),
            },
            ScriptStep::SendKeys { keys, to } => {
                let keys: Vec<KeyInput> = keys.iter().map(KeyInput::from).collect();
                match element(to) {
                    Some(target) => actions.send_keys_to(&target, keys),
                    None => actions.send_keys(keys),
                }
            }
            ScriptStep::DragAndDrop { source, target } => actions.drag_and_drop(
                &ElementRef::new(source.as_str()),
                &ElementRef::new(target.as_str()),
            ),
            ScriptStep::DragAndDropBy { source, x, y } => {
                actions.drag_and_drop_by(&ElementRef::new(source.as_str()), *x, *y)
            }
            ScriptStep::Pause { ms } => actions.pause(Duration::from_millis(*ms)),
        };
    }
}

fn element(id: &Option<String>) -> Option<ElementRef> {
    id.as_deref().map(ElementRef::new)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureScript {
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    pub fn parse(source: &str, path: &str) -> Result<Self, ScriptError> {
        let script: GestureScript =
            serde_yaml::from_str(source).map_err(|source| ScriptError::Parse {
                path: path.to_string(),
                source,
            })?;
        if script.steps.is_empty() {
            return Err(ScriptError::Empty(path.to_string()));
        }
        Ok(script)
    }

    pub async fn load(path: &Path) -> Result<Self, ScriptError> {
        let shown = path.display().to_string();
        let source = fs::read_to_string(path)
            .await
            .map_err(|source| ScriptError::Read {
                path: shown.clone(),
                source,
            })?;
        let script = Self::parse(&source, &shown)?;
        debug!(path = %shown, steps = script.steps.len(), "Loaded gesture script");
        Ok(script)
    }

    pub fn apply(&self, actions: &mut Actions) {
        for step in &self.steps {
            step.apply(actions);
        }
    }
}

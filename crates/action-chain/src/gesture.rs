//! Gestures: the single event both histories are derived from

use std::fmt;
use std::time::Duration;

use crate::device::{KeyboardDevice, PointerDevice};
use crate::errors::ActionError;
use crate::interaction::{DeviceAction, ElementRef, MouseButton, Origin};
use crate::keys::KeyInput;
use crate::policy::InteractionPolicy;

/// One user-facing gesture
///
/// Every gesture expands into one or more single-device ticks for the
/// synchronized protocol and is recorded as-is in the composite list for the
/// legacy protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Click,
    ContextClick,
    ClickAndHold,
    Release,
    MoveToElement { target: ElementRef, x: i32, y: i32 },
    MoveByOffset { x: i32, y: i32 },
    KeyDown(KeyInput),
    KeyUp(KeyInput),
    SendKeys(Vec<KeyInput>),
    Pause(Duration),
}

impl Gesture {
    /// Reject gestures neither history may record
    pub fn validate(&self, legacy_active: bool) -> Result<(), ActionError> {
        match self {
            Gesture::KeyDown(key) | Gesture::KeyUp(key) => validate_single_key(key, legacy_active),
            _ => Ok(()),
        }
    }

    /// Expand into device actions; each entry is ticked on its own
    pub fn interactions(
        &self,
        pointer: &PointerDevice,
        keyboard: &KeyboardDevice,
        policy: &InteractionPolicy,
    ) -> Vec<DeviceAction> {
        match self {
            Gesture::Click => click_with(pointer, MouseButton::Left),
            Gesture::ContextClick => click_with(pointer, MouseButton::Right),
            Gesture::ClickAndHold => vec![pointer.pointer_down(MouseButton::Left.as_arg())],
            Gesture::Release => vec![pointer.pointer_up(MouseButton::Left.as_arg())],
            Gesture::MoveToElement { target, x, y } => vec![pointer.pointer_move(
                policy.element_move(),
                Origin::Element(target.clone()),
                *x,
                *y,
            )],
            Gesture::MoveByOffset { x, y } => {
                vec![pointer.pointer_move(policy.offset_move(), Origin::Pointer, *x, *y)]
            }
            Gesture::KeyDown(key) => key
                .codepoints()
                .into_iter()
                .map(|value| keyboard.key_down(value))
                .collect(),
            Gesture::KeyUp(key) => key
                .codepoints()
                .into_iter()
                .map(|value| keyboard.key_up(value))
                .collect(),
            Gesture::SendKeys(keys) => keys
                .iter()
                .flat_map(KeyInput::codepoints)
                .flat_map(|value| [keyboard.key_down(value), keyboard.key_up(value)])
                .collect(),
            Gesture::Pause(duration) => vec![pointer.pause(*duration)],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Click => "click",
            Gesture::ContextClick => "context_click",
            Gesture::ClickAndHold => "click_and_hold",
            Gesture::Release => "release",
            Gesture::MoveToElement { .. } => "move_to_element",
            Gesture::MoveByOffset { .. } => "move_by_offset",
            Gesture::KeyDown(_) => "key_down",
            Gesture::KeyUp(_) => "key_up",
            Gesture::SendKeys(_) => "send_keys",
            Gesture::Pause(_) => "pause",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::MoveToElement { target, x, y } => {
                write!(f, "{}({}, {}, {})", self.name(), target, x, y)
            }
            Gesture::MoveByOffset { x, y } => write!(f, "{}({}, {})", self.name(), x, y),
            Gesture::KeyDown(key) | Gesture::KeyUp(key) => write!(f, "{}({})", self.name(), key),
            Gesture::SendKeys(keys) => {
                let keys: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
                write!(f, "{}({})", self.name(), keys.join(", "))
            }
            Gesture::Pause(duration) => write!(f, "{}({}ms)", self.name(), duration.as_millis()),
            _ => f.write_str(self.name()),
        }
    }
}

fn click_with(pointer: &PointerDevice, button: MouseButton) -> Vec<DeviceAction> {
    vec![
        pointer.pointer_down(button.as_arg()),
        pointer.pointer_up(button.as_arg()),
    ]
}

fn validate_single_key(key: &KeyInput, legacy_active: bool) -> Result<(), ActionError> {
    // the legacy keyboard only holds modifiers
    if legacy_active && key.as_modifier().is_none() {
        return Err(ActionError::InvalidModifierKey(key.to_string()));
    }
    if key.codepoints().len() != 1 {
        return Err(ActionError::MultiCodepointNotAllowed(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PointerKind;
    use crate::interaction::Interaction;
    use crate::keys::Key;

    fn devices() -> (PointerDevice, KeyboardDevice) {
        (
            PointerDevice::new(PointerKind::Mouse, Some("mouse")),
            KeyboardDevice::new(Some("keys")),
        )
    }

    #[test]
    fn context_click_uses_right_button() {
        let (pointer, keyboard) = devices();
        let actions =
            Gesture::ContextClick.interactions(&pointer, &keyboard, &InteractionPolicy::default());
        let interactions: Vec<_> = actions.into_iter().map(|a| a.interaction).collect();
        assert_eq!(
            interactions,
            vec![
                Interaction::PointerDown { button: 2 },
                Interaction::PointerUp { button: 2 }
            ]
        );
    }

    #[test]
    fn moves_use_policy_durations() {
        let (pointer, keyboard) = devices();
        let policy = InteractionPolicy {
            element_move_ms: 10,
            offset_move_ms: 20,
            ..InteractionPolicy::default()
        };
        let target = ElementRef::new("e1");

        let to_element = Gesture::MoveToElement {
            target: target.clone(),
            x: 3,
            y: 4,
        }
        .interactions(&pointer, &keyboard, &policy);
        assert_eq!(
            to_element[0].interaction,
            Interaction::PointerMove {
                duration: Duration::from_millis(10),
                origin: Origin::Element(target),
                x: 3,
                y: 4
            }
        );

        let by_offset = Gesture::MoveByOffset { x: -5, y: 6 }.interactions(&pointer, &keyboard, &policy);
        assert_eq!(
            by_offset[0].interaction,
            Interaction::PointerMove {
                duration: Duration::from_millis(20),
                origin: Origin::Pointer,
                x: -5,
                y: 6
            }
        );
    }

    #[test]
    fn key_validation_depends_on_legacy_recording() {
        let text = Gesture::KeyDown(KeyInput::from("x"));
        assert!(text.validate(false).is_ok());
        assert_eq!(
            text.validate(true),
            Err(ActionError::InvalidModifierKey("\"x\"".into()))
        );

        let shift = Gesture::KeyUp(Key::Shift.into());
        assert!(shift.validate(true).is_ok());

        let many = Gesture::KeyDown(KeyInput::from("xy"));
        assert!(matches!(
            many.validate(false),
            Err(ActionError::MultiCodepointNotAllowed(_))
        ));
    }

    #[test]
    fn display_is_readable() {
        let gesture = Gesture::MoveToElement {
            target: ElementRef::new("e7"),
            x: 1,
            y: 1,
        };
        assert_eq!(gesture.to_string(), "move_to_element(element:e7, 1, 1)");
        assert_eq!(
            Gesture::Pause(Duration::from_millis(40)).to_string(),
            "pause(40ms)"
        );
    }
}

//! W3C Actions payload shapes

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use actionchain_core_types::ELEMENT_KEY;
use serde::Serialize;

use crate::device::{DeviceKind, PointerKind};
use crate::interaction::{Interaction, Origin};
use crate::sequence::Sequence;

#[derive(Debug, Serialize)]
pub(crate) struct ActionsPayload {
    actions: Vec<InputSource>,
}

impl ActionsPayload {
    /// Source ids are unique per payload: a name already taken falls back to
    /// the device identity
    pub(crate) fn from_sequences(sequences: &[Sequence]) -> Self {
        let mut taken: HashSet<String> = HashSet::with_capacity(sequences.len());
        let actions = sequences
            .iter()
            .map(|sequence| {
                let device = sequence.device();
                let mut id = device.wire_id();
                if !taken.insert(id.clone()) {
                    id = device.id().0.clone();
                    taken.insert(id.clone());
                }
                InputSource::from_sequence(id, sequence)
            })
            .collect();
        Self { actions }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum InputSource {
    Pointer {
        id: String,
        parameters: PointerParameters,
        actions: Vec<SourceAction>,
    },
    Key {
        id: String,
        actions: Vec<SourceAction>,
    },
}

impl InputSource {
    fn from_sequence(id: String, sequence: &Sequence) -> Self {
        let device = sequence.device();
        let actions = sequence.actions().iter().map(SourceAction::from).collect();
        match device.kind() {
            DeviceKind::Pointer(pointer_type) => InputSource::Pointer {
                id,
                parameters: PointerParameters { pointer_type },
                actions,
            },
            DeviceKind::Key => InputSource::Key {
                id,
                actions,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointerParameters {
    pointer_type: PointerKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum SourceAction {
    PointerDown {
        button: u32,
    },
    PointerUp {
        button: u32,
    },
    PointerMove {
        duration: u64,
        origin: WireOrigin,
        x: i32,
        y: i32,
    },
    KeyDown {
        value: String,
    },
    KeyUp {
        value: String,
    },
    Pause {
        duration: u64,
    },
}

impl From<&Interaction> for SourceAction {
    fn from(interaction: &Interaction) -> Self {
        match interaction {
            Interaction::PointerDown { button } => SourceAction::PointerDown { button: *button },
            Interaction::PointerUp { button } => SourceAction::PointerUp { button: *button },
            Interaction::PointerMove {
                duration,
                origin,
                x,
                y,
            } => SourceAction::PointerMove {
                duration: millis(*duration),
                origin: WireOrigin::from(origin),
                x: *x,
                y: *y,
            },
            Interaction::KeyDown { value } => SourceAction::KeyDown {
                value: value.to_string(),
            },
            Interaction::KeyUp { value } => SourceAction::KeyUp {
                value: value.to_string(),
            },
            Interaction::Pause { duration } => SourceAction::Pause {
                duration: millis(*duration),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireOrigin {
    Named(&'static str),
    Element(BTreeMap<&'static str, String>),
}

impl From<&Origin> for WireOrigin {
    fn from(origin: &Origin) -> Self {
        match origin {
            Origin::Viewport => WireOrigin::Named("viewport"),
            Origin::Pointer => WireOrigin::Named("pointer"),
            Origin::Element(element) => {
                WireOrigin::Element(BTreeMap::from([(ELEMENT_KEY, element.id().0.clone())]))
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing and offset defaults applied when gestures are compiled
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionPolicy {
    /// Duration requested for moves onto an element
    pub element_move_ms: u64,
    /// Duration requested for moves relative to the pointer
    pub offset_move_ms: u64,
    /// Offset from the element's top-left corner used by `move_to_element`
    pub element_offset_x: i32,
    pub element_offset_y: i32,
}

impl InteractionPolicy {
    pub fn element_move(&self) -> Duration {
        Duration::from_millis(self.element_move_ms)
    }

    pub fn offset_move(&self) -> Duration {
        Duration::from_millis(self.offset_move_ms)
    }

    pub fn element_offset(&self) -> (i32, i32) {
        (self.element_offset_x, self.element_offset_y)
    }
}

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self {
            element_move_ms: 250,
            offset_move_ms: 200,
            element_offset_x: 1,
            element_offset_y: 1,
        }
    }
}

//! Finalized, immutable snapshot of a built action chain

use serde_json::Value;

use crate::legacy::CompositeAction;
use crate::sequence::Sequence;
use crate::wire::ActionsPayload;

/// Both histories as they stood when the chain was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    sequences: Vec<Sequence>,
    composite: CompositeAction,
}

impl ActionPlan {
    pub(crate) fn new(sequences: Vec<Sequence>, composite: CompositeAction) -> Self {
        Self {
            sequences,
            composite,
        }
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn composite(&self) -> &CompositeAction {
        &self.composite
    }

    pub fn tick_count(&self) -> usize {
        self.sequences.first().map(Sequence::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.tick_count() == 0 && self.composite.is_empty()
    }

    /// Timelines in W3C Actions form: `{"actions": [<input source>, ...]}`
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(ActionsPayload::from_sequences(&self.sequences))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ActionsPayload::from_sequences(&self.sequences))
    }
}

//! Error types for gesture building and dispatch

use thiserror::Error;

/// Errors raised while building or performing an action chain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Two actions in one tick were bound to the same device
    #[error("only one action per input device per tick: {0}")]
    DuplicateDeviceInTick(String),

    /// Key down/up received something other than a modifier key
    #[error("key down/up requires a modifier key (shift, control, alt, meta): {0}")]
    InvalidModifierKey(String),

    /// A single-key operation received more than one code point
    #[error("only one code point is allowed at a time: {0}")]
    MultiCodepointNotAllowed(String),

    /// Raw ticks were composed while legacy device handles are recording
    #[error("raw ticks may not be mixed with legacy input device actions")]
    ConflictingProtocolUsage,

    /// Neither the synchronized command nor legacy device handles are available
    #[error("no protocol available to perform actions: {0}")]
    NoProtocolAvailable(String),

    /// The execution target failed to run a command
    #[error("execution target error: {0}")]
    Target(#[from] TargetError),
}

impl ActionError {
    /// Caller mistakes detected while building, as opposed to execution failures
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ActionError::DuplicateDeviceInTick(_)
                | ActionError::InvalidModifierKey(_)
                | ActionError::MultiCodepointNotAllowed(_)
                | ActionError::ConflictingProtocolUsage
        )
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Failures reported by an execution target or its legacy device handles
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The remote end does not implement the command
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),

    /// A referenced element could not be resolved
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// Any other command failure
    #[error("command failed: {0}")]
    Command(String),
}

impl TargetError {
    /// Whether this failure should trigger the legacy fallback
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TargetError::UnsupportedCommand(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_are_classified() {
        assert!(ActionError::ConflictingProtocolUsage.is_usage_error());
        assert!(ActionError::InvalidModifierKey("x".into()).is_usage_error());
        assert!(!ActionError::Target(TargetError::Command("boom".into())).is_usage_error());
    }

    #[test]
    fn only_unsupported_triggers_fallback() {
        assert!(TargetError::UnsupportedCommand("actions".into()).is_unsupported());
        assert!(!TargetError::NoSuchElement("e1".into()).is_unsupported());
    }
}

use std::sync::{Arc, Mutex};

use action_chain::{
    ActionError, Actions, ElementRef, ExecutionTarget, Key, KeyInput, Keyboard, LegacyDevices,
    Mouse, PerformOutcome, Sequence, TargetCapabilities, TargetError,
};
use async_trait::async_trait;

/// Command log shared by the fake endpoint and its legacy devices
#[derive(Default)]
struct Journal {
    calls: Mutex<Vec<String>>,
}

impl Journal {
    fn record(&self, call: impl Into<String>) -> Result<(), TargetError> {
        self.calls.lock().unwrap().push(call.into());
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Keyboard for Journal {
    async fn send_keys(&self, keys: &[KeyInput]) -> Result<(), TargetError> {
        let keys: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
        self.record(format!("legacy.send_keys {}", keys.join(",")))
    }

    async fn press_key(&self, key: &KeyInput) -> Result<(), TargetError> {
        self.record(format!("legacy.press {}", key))
    }

    async fn release_key(&self, key: &KeyInput) -> Result<(), TargetError> {
        self.record(format!("legacy.release {}", key))
    }
}

#[async_trait]
impl Mouse for Journal {
    async fn click(&self, _target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.record("legacy.click")
    }

    async fn context_click(&self, _target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.record("legacy.context_click")
    }

    async fn mouse_down(&self, _target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.record("legacy.down")
    }

    async fn mouse_up(&self, _target: Option<&ElementRef>) -> Result<(), TargetError> {
        self.record("legacy.up")
    }

    async fn mouse_move(
        &self,
        target: Option<&ElementRef>,
        x_offset: i32,
        y_offset: i32,
    ) -> Result<(), TargetError> {
        let origin = target
            .map(|element| element.id().to_string())
            .unwrap_or_else(|| "pointer".to_string());
        self.record(format!("legacy.move {} {} {}", origin, x_offset, y_offset))
    }
}

struct FakeEndpoint {
    journal: Arc<Journal>,
    synchronized: bool,
    legacy: bool,
    failure: Option<TargetError>,
}

impl FakeEndpoint {
    fn new(synchronized: bool, legacy: bool, failure: Option<TargetError>) -> Self {
        Self {
            journal: Arc::new(Journal::default()),
            synchronized,
            legacy,
            failure,
        }
    }
}

#[async_trait]
impl ExecutionTarget for FakeEndpoint {
    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            synchronized_actions: self.synchronized,
        }
    }

    async fn perform_sequences(&self, sequences: &[Sequence]) -> Result<(), TargetError> {
        self.journal
            .record(format!("actions {}", sequences.len()))?;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn legacy_devices(&self) -> Option<LegacyDevices> {
        if !self.legacy {
            return None;
        }
        let keyboard: Arc<dyn Keyboard> = self.journal.clone();
        let mouse: Arc<dyn Mouse> = self.journal.clone();
        Some(LegacyDevices::new(Some(keyboard), Some(mouse)))
    }
}

fn endpoint(synchronized: bool, legacy: bool, failure: Option<TargetError>) -> (Arc<Journal>, Actions) {
    let endpoint = FakeEndpoint::new(synchronized, legacy, failure);
    let journal = endpoint.journal.clone();
    (journal, Actions::new(Arc::new(endpoint)))
}

#[tokio::test]
async fn synchronized_endpoint_receives_every_timeline() {
    let (journal, mut actions) = endpoint(true, true, None);
    actions.click().key_down(Key::Shift).send_keys(["a"]).key_up(Key::Shift);

    let outcome = actions.perform().await.unwrap();

    assert_eq!(outcome, PerformOutcome::Synchronized);
    assert_eq!(journal.calls(), vec!["actions 2".to_string()]);
}

#[tokio::test]
async fn unsupported_command_replays_legacy_once() {
    let failure = TargetError::UnsupportedCommand("POST /session/actions".into());
    let (journal, mut actions) = endpoint(true, true, Some(failure));
    actions
        .move_to_element(&ElementRef::new("field"))
        .click()
        .key_down(Key::Control)
        .send_keys(["a"])
        .key_up(Key::Control);

    let outcome = actions.perform().await.unwrap();

    assert_eq!(outcome, PerformOutcome::Legacy);
    assert_eq!(journal.count("actions"), 1);
    assert_eq!(
        journal.calls(),
        vec![
            "actions 2".to_string(),
            "legacy.move field 1 1".to_string(),
            "legacy.click".to_string(),
            "legacy.press Key::Control".to_string(),
            "legacy.send_keys \"a\"".to_string(),
            "legacy.release Key::Control".to_string(),
        ]
    );
}

#[tokio::test]
async fn other_failures_propagate_without_fallback() {
    let failure = TargetError::NoSuchElement("field".into());
    let (journal, mut actions) = endpoint(true, true, Some(failure.clone()));
    actions.click_on(&ElementRef::new("field"));

    let err = actions.perform().await.unwrap_err();

    assert_eq!(err, ActionError::Target(failure));
    assert_eq!(journal.calls(), vec!["actions 1".to_string()]);
}

#[tokio::test]
async fn unsupported_without_legacy_devices_is_returned() {
    let failure = TargetError::UnsupportedCommand("actions".into());
    let (journal, mut actions) = endpoint(true, false, Some(failure.clone()));
    actions.click();

    let err = actions.perform().await.unwrap_err();

    assert_eq!(err, ActionError::Target(failure));
    assert_eq!(journal.count("legacy"), 0);
}

#[tokio::test]
async fn endpoint_without_synchronized_actions_goes_straight_to_legacy() {
    let (journal, mut actions) = endpoint(false, true, None);
    actions.double_click();

    let outcome = actions.perform().await.unwrap();

    assert_eq!(outcome, PerformOutcome::Legacy);
    assert_eq!(journal.count("actions"), 0);
    assert_eq!(journal.count("legacy.click"), 2);
}

#[tokio::test]
async fn endpoint_with_no_protocol_fails() {
    let (_journal, mut actions) = endpoint(false, false, None);
    actions.click();

    let err = actions.perform().await.unwrap_err();

    assert!(matches!(err, ActionError::NoProtocolAvailable(_)));
}

#[tokio::test]
async fn device_only_builder_replays_through_handles() {
    let journal = Arc::new(Journal::default());
    let keyboard: Arc<dyn Keyboard> = journal.clone();
    let mouse: Arc<dyn Mouse> = journal.clone();
    let mut actions = Actions::with_devices(Some(keyboard), Some(mouse));
    actions.drag_and_drop_by(&ElementRef::new("slider"), 40, 0);

    let outcome = actions.perform().await.unwrap();

    assert_eq!(outcome, PerformOutcome::Legacy);
    assert_eq!(
        journal.calls(),
        vec![
            "legacy.move slider 1 1".to_string(),
            "legacy.down".to_string(),
            "legacy.move pointer 40 0".to_string(),
            "legacy.up".to_string(),
        ]
    );
}

#[tokio::test]
async fn repeated_perform_reexecutes_accumulated_history() {
    let (journal, mut actions) = endpoint(false, true, None);
    actions.click();
    actions.perform().await.unwrap();
    actions.context_click();
    actions.perform().await.unwrap();

    assert_eq!(
        journal.calls(),
        vec![
            "legacy.click".to_string(),
            "legacy.click".to_string(),
            "legacy.context_click".to_string(),
        ]
    );
}

#[tokio::test]
async fn deferred_usage_error_stops_perform_before_any_call() {
    let (journal, mut actions) = endpoint(true, true, None);
    actions.click().key_down("x");

    let err = actions.perform().await.unwrap_err();

    assert!(matches!(err, ActionError::InvalidModifierKey(_)));
    assert!(journal.calls().is_empty());
}

//! Fluent gesture builder
//!
//! [`Actions`] is a single-owner session. Every gesture call feeds one
//! [`Gesture`] to both the tick coordinator and, when the endpoint exposes
//! legacy device handles, the composite recorder, so the two histories always
//! describe the same calls. Usage mistakes are kept as the first deferred
//! error and reported by [`Actions::build`] and [`Actions::perform`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::device::{DeviceRegistry, InputDevice, KeyboardDevice, PointerDevice, PointerKind};
use crate::dispatcher::{Dispatcher, PerformOutcome};
use crate::errors::ActionError;
use crate::gesture::Gesture;
use crate::interaction::{DeviceAction, ElementRef};
use crate::keys::KeyInput;
use crate::legacy::{CompositeAction, LegacyRecorder};
use crate::plan::ActionPlan;
use crate::policy::InteractionPolicy;
use crate::ports::{ExecutionTarget, Keyboard, LegacyDevices, Mouse, TargetCapabilities};
use crate::sequence::Sequence;
use crate::tick::TickCoordinator;

pub struct Actions {
    target: Option<Arc<dyn ExecutionTarget>>,
    capabilities: TargetCapabilities,
    registry: DeviceRegistry,
    policy: InteractionPolicy,
    ticks: TickCoordinator,
    legacy: LegacyRecorder,
    deferred: Option<ActionError>,
}

impl Actions {
    /// Builder bound to an execution target; its capabilities are read once here
    pub fn new(target: Arc<dyn ExecutionTarget>) -> Self {
        let capabilities = target.capabilities();
        let legacy = LegacyRecorder::new(target.legacy_devices());
        debug!(
            synchronized = capabilities.synchronized_actions,
            legacy = legacy.is_active(),
            "Created action builder"
        );
        Self::assemble(Some(target), capabilities, legacy)
    }

    /// Builder driving legacy device handles directly, without a synchronized endpoint
    pub fn with_devices(keyboard: Option<Arc<dyn Keyboard>>, mouse: Option<Arc<dyn Mouse>>) -> Self {
        let legacy = LegacyRecorder::new(Some(LegacyDevices::new(keyboard, mouse)));
        Self::assemble(None, TargetCapabilities::default(), legacy)
    }

    fn assemble(
        target: Option<Arc<dyn ExecutionTarget>>,
        capabilities: TargetCapabilities,
        legacy: LegacyRecorder,
    ) -> Self {
        Self {
            target,
            capabilities,
            registry: DeviceRegistry::new(),
            policy: InteractionPolicy::default(),
            ticks: TickCoordinator::new(),
            legacy,
            deferred: None,
        }
    }

    pub fn with_policy(mut self, policy: InteractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &InteractionPolicy {
        &self.policy
    }

    // --- keyboard ---

    /// Press a key without releasing it
    ///
    /// While legacy handles are recording only modifier keys are accepted.
    pub fn key_down(&mut self, key: impl Into<KeyInput>) -> &mut Self {
        self.emit(Gesture::KeyDown(key.into()))
    }

    pub fn key_up(&mut self, key: impl Into<KeyInput>) -> &mut Self {
        self.emit(Gesture::KeyUp(key.into()))
    }

    /// Click the element, then press the key
    pub fn key_down_on(&mut self, target: &ElementRef, key: impl Into<KeyInput>) -> &mut Self {
        let gesture = Gesture::KeyDown(key.into());
        if self.reject(&gesture) {
            return self;
        }
        self.click_on(target).emit(gesture)
    }

    pub fn key_up_on(&mut self, target: &ElementRef, key: impl Into<KeyInput>) -> &mut Self {
        let gesture = Gesture::KeyUp(key.into());
        if self.reject(&gesture) {
            return self;
        }
        self.click_on(target).emit(gesture)
    }

    /// Type every code point as a down/up pair on the default keyboard
    pub fn send_keys<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyInput>,
    {
        let keys = keys.into_iter().map(Into::into).collect();
        self.emit(Gesture::SendKeys(keys))
    }

    pub fn send_keys_to<I, K>(&mut self, target: &ElementRef, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyInput>,
    {
        self.click_on(target).send_keys(keys)
    }

    // --- pointer ---

    pub fn click(&mut self) -> &mut Self {
        self.emit(Gesture::Click)
    }

    pub fn click_on(&mut self, target: &ElementRef) -> &mut Self {
        self.move_to_element(target).click()
    }

    pub fn double_click(&mut self) -> &mut Self {
        self.click().click()
    }

    pub fn double_click_on(&mut self, target: &ElementRef) -> &mut Self {
        self.move_to_element(target).double_click()
    }

    pub fn context_click(&mut self) -> &mut Self {
        self.emit(Gesture::ContextClick)
    }

    pub fn context_click_on(&mut self, target: &ElementRef) -> &mut Self {
        self.move_to_element(target).context_click()
    }

    /// Press the left button without releasing it
    pub fn click_and_hold(&mut self) -> &mut Self {
        self.emit(Gesture::ClickAndHold)
    }

    pub fn click_and_hold_on(&mut self, target: &ElementRef) -> &mut Self {
        self.move_to_element(target).click_and_hold()
    }

    /// Release the left button. Calling this without a held button is not checked
    pub fn release(&mut self) -> &mut Self {
        self.emit(Gesture::Release)
    }

    pub fn release_on(&mut self, target: &ElementRef) -> &mut Self {
        self.move_to_element(target).release()
    }

    /// Move to the element, offset from its top-left corner by the policy default
    pub fn move_to_element(&mut self, target: &ElementRef) -> &mut Self {
        let (x, y) = self.policy.element_offset();
        self.move_to_element_with_offset(target, x, y)
    }

    pub fn move_to_element_with_offset(&mut self, target: &ElementRef, x: i32, y: i32) -> &mut Self {
        self.emit(Gesture::MoveToElement {
            target: target.clone(),
            x,
            y,
        })
    }

    /// Move relative to the current pointer position
    pub fn move_by_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.emit(Gesture::MoveByOffset { x, y })
    }

    pub fn drag_and_drop(&mut self, source: &ElementRef, target: &ElementRef) -> &mut Self {
        self.click_and_hold_on(source)
            .move_to_element(target)
            .release()
    }

    pub fn drag_and_drop_by(&mut self, source: &ElementRef, x: i32, y: i32) -> &mut Self {
        self.click_and_hold_on(source).move_by_offset(x, y).release()
    }

    #[deprecated(note = "durations belong on the device actions; use tick() with a device pause")]
    pub fn pause(&mut self, duration: Duration) -> &mut Self {
        self.emit(Gesture::Pause(duration))
    }

    // --- raw composition ---

    /// Append one synchronized step built from explicit device actions
    ///
    /// Fails immediately when two actions share a device. While legacy handles
    /// are recording the step is kept but the build is marked invalid.
    pub fn tick(&mut self, actions: Vec<DeviceAction>) -> Result<&mut Self, ActionError> {
        self.ticks.tick(actions)?;
        if self.legacy.is_active() {
            self.defer(ActionError::ConflictingProtocolUsage);
        }
        Ok(self)
    }

    /// Append a gesture to both histories on the default devices
    pub fn tick_gesture(&mut self, gesture: Gesture) -> &mut Self {
        self.emit(gesture)
    }

    /// A new non-primary pointer for use in [`Actions::tick`]
    pub fn pointer(&self, kind: PointerKind, name: Option<&str>) -> PointerDevice {
        self.registry.pointer(kind, name)
    }

    pub fn keyboard(&self, name: Option<&str>) -> KeyboardDevice {
        self.registry.keyboard(name)
    }

    pub fn default_pointer(&self) -> &PointerDevice {
        self.registry.default_pointer()
    }

    pub fn default_keyboard(&self) -> &KeyboardDevice {
        self.registry.default_keyboard()
    }

    // --- state ---

    pub fn sequences(&self) -> &[Sequence] {
        self.ticks.sequences()
    }

    pub fn sequence(&self, device: &InputDevice) -> Option<&Sequence> {
        self.ticks.sequence(device)
    }

    pub fn composite(&self) -> &CompositeAction {
        self.legacy.composite()
    }

    pub fn tick_count(&self) -> usize {
        self.ticks.ticks()
    }

    pub fn is_recording_legacy(&self) -> bool {
        self.legacy.is_active()
    }

    pub fn deferred_error(&self) -> Option<&ActionError> {
        self.deferred.as_ref()
    }

    /// Snapshot both histories, or return the first deferred usage error
    pub fn build(&self) -> Result<ActionPlan, ActionError> {
        if let Some(err) = &self.deferred {
            return Err(err.clone());
        }
        Ok(ActionPlan::new(
            self.ticks.sequences().to_vec(),
            self.legacy.composite().clone(),
        ))
    }

    /// Run everything accumulated so far; the history is kept for further calls
    pub async fn perform(&self) -> Result<PerformOutcome, ActionError> {
        let plan = self.build()?;
        Dispatcher::new(self.target.as_deref(), self.capabilities, self.legacy.devices())
            .perform(&plan)
            .await
    }

    fn emit(&mut self, gesture: Gesture) -> &mut Self {
        if self.reject(&gesture) {
            return self;
        }

        let expanded = gesture.interactions(
            self.registry.default_pointer(),
            self.registry.default_keyboard(),
            &self.policy,
        );
        for action in expanded {
            // one action per tick never collides
            if let Err(err) = self.ticks.tick(vec![action]) {
                self.defer(err);
            }
        }
        self.legacy.record(gesture);
        self
    }

    fn reject(&mut self, gesture: &Gesture) -> bool {
        match gesture.validate(self.legacy.is_active()) {
            Ok(()) => false,
            Err(err) => {
                debug!(gesture = %gesture, error = %err, "Rejected gesture");
                self.defer(err);
                true
            }
        }
    }

    fn defer(&mut self, err: ActionError) {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("capabilities", &self.capabilities)
            .field("ticks", &self.ticks.ticks())
            .field("devices", &self.ticks.sequences().len())
            .field("composite", &self.legacy.composite().len())
            .field("deferred", &self.deferred)
            .finish()
    }
}

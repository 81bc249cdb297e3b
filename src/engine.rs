//! The gesture engine: one tick per frame, fixed priority between recognisers.
//!
//! Per tick, with at least one hand present:
//! 1. the two-hand trigger is checked first; if it fires, nothing else runs
//!    this tick (held buttons are released, and the configured trigger action
//!    is applied);
//! 2. inside the cooldown that follows a trigger, only an active resize session
//!    is serviced; the pointer and both pinch trackers are bypassed;
//! 3. otherwise the pointer follows the primary hand (unless a resize session
//!    is active, which gets the hand instead), then the left and right pinch
//!    trackers see the primary hand, in that order.
//!
//! Actions are forwarded to the actuator as soon as the tick has produced them.

use log::{debug, info};

use crate::{
    actions::Action,
    gesture_config::{GestureConfig, TriggerAction},
    interfaces::Actuator,
    landmarks::{Frame, HandObservation, Handedness, Timestamp},
    systems::Systems,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Cooldown,
    Resizing,
}

pub struct GestureEngine {
    systems: Systems,
    trigger_action: TriggerAction,
    primary_hand: Option<Handedness>,
    dead_zone_px: f32,
    /// Last cursor position actually sent
    last_cursor: Option<(i32, i32)>,
}

impl GestureEngine {
    pub fn new(config: &GestureConfig) -> Self {
        GestureEngine {
            systems: Systems::new(config),
            trigger_action: config.trigger_action,
            primary_hand: config.primary_hand,
            dead_zone_px: config.pointer_dead_zone_px,
            last_cursor: None,
        }
    }

    pub fn systems(&self) -> &Systems {
        &self.systems
    }

    pub fn state(&self, now: Timestamp) -> EngineState {
        if self.systems.resize_controller.is_active() {
            EngineState::Resizing
        } else if self.systems.trigger_detector.in_cooldown(now) {
            EngineState::Cooldown
        } else {
            EngineState::Idle
        }
    }

    /// Classify one frame and forward the resulting actions. Returns the
    /// actions forwarded, in order.
    pub fn tick(&mut self, frame: &Frame, actuator: &mut dyn Actuator) -> Vec<Action> {
        let actions = self.classify(frame, actuator);
        for action in actions.iter() {
            actuator.perform(action);
        }
        actions
    }

    /// Release any button held by a pinch. Used on shutdown.
    pub fn release_all(&mut self, actuator: &mut dyn Actuator) -> Vec<Action> {
        let mut actions = Vec::new();
        self.cancel_pinches(&mut actions);
        for action in actions.iter() {
            actuator.perform(action);
        }
        actions
    }

    fn classify(&mut self, frame: &Frame, actuator: &dyn Actuator) -> Vec<Action> {
        let now = frame.timestamp;
        let mut actions = Vec::new();

        let Some(primary) = frame.primary_hand(self.primary_hand) else {
            // Hands gone: the two-hand pose is broken
            self.systems.trigger_detector.observe(&frame.hands, now);
            return actions;
        };

        if self.systems.trigger_detector.observe(&frame.hands, now) {
            self.on_trigger(primary, actuator, &mut actions);
            return actions;
        }

        if self.systems.trigger_detector.in_cooldown(now) {
            actions.extend(self.systems.resize_controller.on_frame(primary));
            return actions;
        }

        if self.systems.resize_controller.is_active() {
            actions.extend(self.systems.resize_controller.on_frame(primary));
        } else if let Some(movement) = self.move_pointer(primary, actuator.screen_size()) {
            actions.push(movement);
        }

        for tracker in [
            &mut self.systems.left_click,
            &mut self.systems.right_click,
        ] {
            if let Some(click) = tracker.observe(primary, now) {
                actions.push(click.for_button(tracker.button()));
            }
        }

        actions
    }

    fn on_trigger(
        &mut self,
        primary: &HandObservation,
        actuator: &dyn Actuator,
        actions: &mut Vec<Action>,
    ) {
        self.cancel_pinches(actions);

        match self.trigger_action {
            TriggerAction::ToggleResize => {
                let active = self
                    .systems
                    .resize_controller
                    .on_trigger(primary, actuator.foreground_window_size());
                info!(
                    "Trigger: resize mode {}",
                    if active { "on" } else { "off" }
                );
            }
            TriggerAction::ToggleMaximize => {
                info!("Trigger: toggle maximize");
                self.systems.resize_controller.end();
                actions.push(Action::ToggleMaximize);
            }
        }
    }

    fn cancel_pinches(&mut self, actions: &mut Vec<Action>) {
        for tracker in [
            &mut self.systems.left_click,
            &mut self.systems.right_click,
        ] {
            if let Some(release) = tracker.cancel() {
                actions.push(release.for_button(tracker.button()));
            }
        }
    }

    fn move_pointer(&mut self, hand: &HandObservation, screen_size: (u32, u32)) -> Option<Action> {
        let (raw_x, raw_y) = self
            .systems
            .position_remapping
            .to_screen(hand.index_tip(), screen_size);
        let (x, y) = self.systems.pointer_smoother.update(raw_x, raw_y)?;
        let target = (x.round() as i32, y.round() as i32);

        if let Some((last_x, last_y)) = self.last_cursor {
            let moved_x = (target.0 - last_x).abs() as f32;
            let moved_y = (target.1 - last_y).abs() as f32;
            if moved_x < self.dead_zone_px && moved_y < self.dead_zone_px {
                return None;
            }
        }

        debug!("Pointer -> {:?}", target);
        self.last_cursor = Some(target);
        Some(Action::MoveCursor {
            x: target.0,
            y: target.1,
        })
    }
}

use std::time::Duration;

use log::{debug, info};

use crate::{
    actions::{ClickAction, MouseButton},
    geometry_utils::landmark_distance,
    landmarks::{HandObservation, MIDDLE_TIP, RING_TIP, THUMB_TIP, Timestamp},
};

pub struct PinchSettings {
    /// The two landmarks that close together to make this pinch
    pub landmarks: (usize, usize),
    pub threshold: f32,
    pub stable_frames: u32,
    pub hold_threshold: Duration,
}

impl PinchSettings {
    /// Thumb tip to middle fingertip
    pub fn left_click(threshold: f32, stable_frames: u32, hold_threshold: Duration) -> Self {
        PinchSettings {
            landmarks: (THUMB_TIP, MIDDLE_TIP),
            threshold,
            stable_frames,
            hold_threshold,
        }
    }

    /// Thumb tip to ring fingertip
    pub fn right_click(threshold: f32, stable_frames: u32, hold_threshold: Duration) -> Self {
        PinchSettings {
            landmarks: (THUMB_TIP, RING_TIP),
            threshold,
            stable_frames,
            hold_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchState {
    Idle,
    /// Pinch is stable but has not been held long enough to be a press
    Armed { since: Timestamp },
    /// Button is (logically) down
    Holding { since: Timestamp },
}

/// Turns per-frame finger distances into click / press-and-hold events for one button.
pub struct PinchGestureTracker {
    button: MouseButton,
    settings: PinchSettings,
    state: PinchState,
    /// Consecutive frames with the fingers inside the threshold
    frames_pinched: u32,
}

impl PinchGestureTracker {
    pub fn new(button: MouseButton, settings: PinchSettings) -> Self {
        PinchGestureTracker {
            button,
            settings,
            state: PinchState::Idle,
            frames_pinched: 0,
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn state(&self) -> PinchState {
        self.state
    }

    pub fn observe(&mut self, hand: &HandObservation, now: Timestamp) -> Option<ClickAction> {
        let (a, b) = self.settings.landmarks;
        let distance = landmark_distance(hand.landmark(a), hand.landmark(b));

        if distance < self.settings.threshold {
            self.frames_pinched = self.frames_pinched.saturating_add(1);
            if self.frames_pinched < self.settings.stable_frames {
                return None;
            }
            match self.state {
                PinchState::Idle => {
                    debug!("{:?} pinch stable at {:?}", self.button, now);
                    self.state = PinchState::Armed { since: now };
                    None
                }
                PinchState::Armed { since }
                    if now.saturating_sub(since) > self.settings.hold_threshold =>
                {
                    info!("{:?} press start", self.button);
                    self.state = PinchState::Holding { since };
                    Some(ClickAction::PressStart)
                }
                PinchState::Armed { .. } | PinchState::Holding { .. } => None,
            }
        } else {
            self.frames_pinched = 0;
            let action = match self.state {
                PinchState::Idle => None,
                PinchState::Armed { since }
                    if now.saturating_sub(since) <= self.settings.hold_threshold =>
                {
                    info!("{:?} click", self.button);
                    Some(ClickAction::Click)
                }
                // Held past the threshold, but released before any frame could
                // start the press: nothing was pressed, so nothing to end
                PinchState::Armed { .. } => None,
                PinchState::Holding { .. } => {
                    info!("{:?} press end", self.button);
                    Some(ClickAction::PressEnd)
                }
            };
            self.state = PinchState::Idle;
            action
        }
    }

    /// Abandon any pinch in progress. Returns `PressEnd` if the button was down.
    pub fn cancel(&mut self) -> Option<ClickAction> {
        let action = match self.state {
            PinchState::Holding { .. } => {
                info!("{:?} press cancelled", self.button);
                Some(ClickAction::PressEnd)
            }
            _ => None,
        };
        self.state = PinchState::Idle;
        self.frames_pinched = 0;
        action
    }
}

use std::time::Duration;

use log::{debug, info};

use crate::landmarks::{HandObservation, Timestamp};

/// The earliest time the next trigger may fire
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownWindow {
    until: Option<Timestamp>,
}

impl CooldownWindow {
    pub fn start(&mut self, now: Timestamp, length: Duration) {
        self.until = Some(now + length);
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        matches!(self.until, Some(until) if now < until)
    }

    pub fn until(&self) -> Option<Timestamp> {
        self.until
    }
}

pub struct TriggerSettings {
    pub stable_frames: u32,
    pub cooldown: Duration,
}

/// Watches for both hands held in a thumbs-up pose.
///
/// Fires once per sustained pose: after firing, the pose has to be broken
/// (a hand leaves the frame or drops the pose) before it can fire again, and
/// never inside the cooldown window that follows each firing.
pub struct TwoHandTriggerDetector {
    settings: TriggerSettings,
    cooldown: CooldownWindow,
    /// Consecutive frames with both hands in the pose
    frames_posed: u32,
    /// Already fired for the pose currently held
    latched: bool,
}

impl TwoHandTriggerDetector {
    pub fn new(settings: TriggerSettings) -> Self {
        TwoHandTriggerDetector {
            settings,
            cooldown: CooldownWindow::default(),
            frames_posed: 0,
            latched: false,
        }
    }

    pub fn observe(&mut self, hands: &[HandObservation], now: Timestamp) -> bool {
        let posed = hands.len() >= 2 && hands.iter().take(2).all(|h| h.is_thumbs_up());
        if !posed {
            if self.frames_posed > 0 {
                debug!("Two-hand pose broken after {} frames", self.frames_posed);
            }
            self.frames_posed = 0;
            self.latched = false;
            return false;
        }

        self.frames_posed = self.frames_posed.saturating_add(1);
        if self.latched || self.frames_posed < self.settings.stable_frames {
            return false;
        }
        if self.cooldown.is_active(now) {
            debug!("Two-hand pose held during cooldown; ignored");
            return false;
        }

        info!("Two-hand trigger fired at {:?}", now);
        self.latched = true;
        self.cooldown.start(now, self.settings.cooldown);
        true
    }

    pub fn in_cooldown(&self, now: Timestamp) -> bool {
        self.cooldown.is_active(now)
    }

    pub fn cooldown(&self) -> &CooldownWindow {
        &self.cooldown
    }
}

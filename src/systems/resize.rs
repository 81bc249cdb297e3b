use log::{debug, info, warn};

use crate::{actions::Action, landmarks::HandObservation};

pub struct ResizeSettings {
    pub scale_factor: f32,
    pub min_dimension: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub base_width: u32,
    pub base_height: u32,
}

/// Drag-resizing of the foreground window.
///
/// A session is anchored at the index fingertip and the window size at the
/// moment it starts. Moving the fingertip right widens the window, moving it up
/// makes it taller; sizes are relative to the anchored size.
pub struct ResizeController {
    settings: ResizeSettings,
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new(settings: ResizeSettings) -> Self {
        ResizeController {
            settings,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Start a session if none is active, otherwise end the current one.
    /// Returns whether a session is active afterwards.
    pub fn on_trigger(&mut self, hand: &HandObservation, window_size: Option<(u32, u32)>) -> bool {
        if self.session.is_some() {
            self.end();
            return false;
        }
        match window_size {
            Some((base_width, base_height)) => {
                let tip = hand.index_tip();
                info!(
                    "Resize session started at ({:.3}, {:.3}); window {}x{}",
                    tip.x, tip.y, base_width, base_height
                );
                self.session = Some(ResizeSession {
                    anchor_x: tip.x,
                    anchor_y: tip.y,
                    base_width,
                    base_height,
                });
                true
            }
            None => {
                warn!("No foreground window to resize; session not started");
                false
            }
        }
    }

    /// Clears the anchor and base size. Safe to call with no session.
    pub fn end(&mut self) {
        if self.session.take().is_some() {
            info!("Resize session ended");
        }
    }

    pub fn on_frame(&self, hand: &HandObservation) -> Option<Action> {
        let session = self.session.as_ref()?;
        let tip = hand.index_tip();
        let dx = tip.x - session.anchor_x;
        let dy = session.anchor_y - tip.y;
        if !(dx.is_finite() && dy.is_finite()) {
            debug!("Ignoring non-finite fingertip during resize");
            return None;
        }

        let width = self.scaled(session.base_width, dx);
        let height = self.scaled(session.base_height, dy);
        debug!("Resize dx={:.3} dy={:.3} -> {}x{}", dx, dy, width, height);

        Some(Action::ResizeWindow { width, height })
    }

    fn scaled(&self, base: u32, delta: f32) -> u32 {
        let base = base as f32;
        let size = base + delta * base * self.settings.scale_factor;
        // Truncates towards zero; float-to-int casts saturate, so a huge delta
        // cannot wrap
        (size.max(0.) as u32).max(self.settings.min_dimension)
    }
}

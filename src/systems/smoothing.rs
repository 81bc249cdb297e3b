use log::debug;

use crate::{Point2D, geometry_utils::lerp};

/// Exponential smoothing of the pointer target.
///
/// Each update moves the smoothed position a fixed fraction (`smoothing_factor`)
/// of the way towards the latest raw target, so jitter in the raw signal is
/// damped while steady motion is followed with a short lag.
pub struct PointerSmoother {
    smoothing_factor: f32,
    current_position: Option<Point2D>,
}

impl PointerSmoother {
    /// Starts without a position; the first update snaps to its target
    pub fn new(smoothing_factor: f32) -> Self {
        if !(smoothing_factor > 0. && smoothing_factor <= 1.) {
            panic!("Smoothing factor must be in (0;1], got {}", smoothing_factor);
        }
        PointerSmoother {
            smoothing_factor,
            current_position: None,
        }
    }

    pub fn with_initial(smoothing_factor: f32, initial_position: Point2D) -> Self {
        PointerSmoother {
            current_position: Some(initial_position),
            ..PointerSmoother::new(smoothing_factor)
        }
    }

    /// Non-finite samples are skipped and leave the position as it was; returns
    /// `None` only while no usable sample has been seen yet
    pub fn update(&mut self, raw_x: f32, raw_y: f32) -> Option<Point2D> {
        if !(raw_x.is_finite() && raw_y.is_finite()) {
            debug!("Ignoring non-finite pointer sample ({}, {})", raw_x, raw_y);
            return self.current_position;
        }
        let t = self.smoothing_factor;
        let next = match self.current_position {
            None => (raw_x, raw_y),
            Some((x, y)) => (lerp(x, raw_x, t), lerp(y, raw_y, t)),
        };
        self.current_position = Some(next);
        Some(next)
    }

    pub fn current_position(&self) -> Option<Point2D> {
        self.current_position
    }
}

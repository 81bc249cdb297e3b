use map_range::MapRange;

use crate::{Point2D, landmarks::LandmarkPoint};

/// Maps a normalised fingertip position onto screen pixels.
///
/// A margin shrinks the usable part of the camera image: with a margin of 0.1
/// the fingertip only needs to travel between 10% and 90% of the frame to reach
/// both screen edges.
pub struct PositionRemapping {
    margin: f32,
}

impl PositionRemapping {
    pub fn new(margin: f32) -> Self {
        PositionRemapping { margin }
    }

    pub fn to_screen(&self, point: &LandmarkPoint, screen_size: (u32, u32)) -> Point2D {
        let (w, h) = (screen_size.0 as f32, screen_size.1 as f32);
        let (low, high) = (self.margin, 1. - self.margin);

        let x = point.x.map_range(low..high, 0. ..w);
        let y = point.y.map_range(low..high, 0. ..h);

        (clamp_to_pixels(x, w), clamp_to_pixels(y, h))
    }
}

fn clamp_to_pixels(value: f32, extent: f32) -> f32 {
    value.clamp(0., (extent - 1.).max(0.))
}

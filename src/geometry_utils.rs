use crate::{Point2D, landmarks::LandmarkPoint};

pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x2 - x1).powf(2.0) + (y2 - y1).powf(2.0)).sqrt()
}

pub fn distance_points(a: &Point2D, b: &Point2D) -> f32 {
    let (x1, y1) = *a;
    let (x2, y2) = *b;

    f32::sqrt(f32::powi(x1 - x2, 2) + f32::powi(y1 - y2, 2))
}

/// Planar distance between two landmarks in normalised image space; depth is ignored
pub fn landmark_distance(a: &LandmarkPoint, b: &LandmarkPoint) -> f32 {
    distance(a.x, a.y, b.x, b.y)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1. - t) + (b * t)
}

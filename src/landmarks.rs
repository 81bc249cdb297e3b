//! Hand landmark data as delivered by the pose estimator.
//!
//! Coordinates are normalised to the camera image: `x` grows to the right, `y`
//! grows *downward*, both in [0;1]. Every detected hand carries exactly 21
//! landmarks in the fixed anatomical order below.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

/// Time since the sensor stream started. All gesture timing is measured on
/// frame timestamps, never on the wall clock, so replaying the same frames
/// reproduces the same actions.
pub type Timestamp = Duration;

pub const LANDMARK_COUNT: usize = 21;

/// The sensor never reports more than this many hands per frame
pub const MAX_HANDS: usize = 2;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, base joint) for the four non-thumb fingers
pub const FINGER_TIPS_AND_BASES: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        LandmarkPoint { x, y, z: None }
    }

    pub fn with_depth(self, z: f32) -> Self {
        LandmarkPoint { z: Some(z), ..self }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub landmarks: [LandmarkPoint; LANDMARK_COUNT],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,
    /// Detection confidence reported by the estimator, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl HandObservation {
    pub fn new(landmarks: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        HandObservation {
            landmarks,
            handedness: None,
            score: None,
        }
    }

    pub fn with_handedness(self, handedness: Handedness) -> Self {
        HandObservation {
            handedness: Some(handedness),
            ..self
        }
    }

    pub fn landmark(&self, index: usize) -> &LandmarkPoint {
        &self.landmarks[index]
    }

    pub fn index_tip(&self) -> &LandmarkPoint {
        self.landmark(INDEX_TIP)
    }

    /// "Thumbs-up": thumb tip above the thumb MCP joint, and every other
    /// fingertip at or below its PIP joint (curled).
    pub fn is_thumbs_up(&self) -> bool {
        let thumb_extended = self.landmark(THUMB_TIP).y < self.landmark(THUMB_MCP).y;
        thumb_extended
            && FINGER_TIPS_AND_BASES
                .iter()
                .all(|(tip, base)| self.landmark(*tip).y >= self.landmark(*base).y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Frame {
    #[serde(with = "seconds")]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

impl Frame {
    pub fn new(timestamp: Timestamp, mut hands: Vec<HandObservation>) -> Self {
        if hands.len() > MAX_HANDS {
            debug!(
                "Frame had {} hands; keeping the first {}",
                hands.len(),
                MAX_HANDS
            );
            hands.truncate(MAX_HANDS);
        }
        Frame { timestamp, hands }
    }

    pub fn empty(timestamp: Timestamp) -> Self {
        Frame {
            timestamp,
            hands: Vec::new(),
        }
    }

    /// The hand that drives the pointer, clicks and resizing.
    ///
    /// The estimator does not guarantee a stable left/right assignment across
    /// frames, so the label is only a preference: if no hand carries the
    /// preferred label (or no preference is given) the first hand in the
    /// frame is used.
    pub fn primary_hand(&self, preferred: Option<Handedness>) -> Option<&HandObservation> {
        preferred
            .and_then(|wanted| self.hands.iter().find(|h| h.handedness == Some(wanted)))
            .or_else(|| self.hands.first())
    }
}

/// Timestamps travel as floating-point seconds in recordings
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|e| {
            D::Error::custom(format!(
                "timestamp must be a non-negative number of seconds, got {} ({})",
                secs, e
            ))
        })
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// An open, relaxed hand: fingers pointing up, thumb out to the side,
    /// no pinch and no thumbs-up.
    pub fn neutral_hand() -> HandObservation {
        let mut points = [LandmarkPoint::new(0.5, 0.8); LANDMARK_COUNT];
        points[WRIST] = LandmarkPoint::new(0.5, 0.8);
        points[THUMB_CMC] = LandmarkPoint::new(0.44, 0.76);
        points[THUMB_MCP] = LandmarkPoint::new(0.40, 0.72);
        points[THUMB_IP] = LandmarkPoint::new(0.37, 0.70);
        points[THUMB_TIP] = LandmarkPoint::new(0.34, 0.68);
        for (finger, x) in [(INDEX_MCP, 0.45), (MIDDLE_MCP, 0.5), (RING_MCP, 0.55), (PINKY_MCP, 0.6)] {
            points[finger] = LandmarkPoint::new(x, 0.65);
            points[finger + 1] = LandmarkPoint::new(x, 0.55);
            points[finger + 2] = LandmarkPoint::new(x, 0.48);
            points[finger + 3] = LandmarkPoint::new(x, 0.42);
        }
        HandObservation::new(points)
    }

    /// Neutral hand with `other` moved to `distance` from the thumb tip
    pub fn pinching(other: usize, distance: f32) -> HandObservation {
        let mut hand = neutral_hand();
        let thumb = hand.landmarks[THUMB_TIP];
        hand.landmarks[other] = LandmarkPoint::new(thumb.x + distance, thumb.y);
        hand
    }

    /// Neutral hand with the index tip at the given position
    pub fn pointing_at(x: f32, y: f32) -> HandObservation {
        let mut hand = neutral_hand();
        hand.landmarks[INDEX_TIP] = LandmarkPoint::new(x, y);
        hand
    }

    /// Fist with the thumb raised
    pub fn thumbs_up() -> HandObservation {
        let mut hand = neutral_hand();
        hand.landmarks[THUMB_MCP] = LandmarkPoint::new(0.42, 0.60);
        hand.landmarks[THUMB_IP] = LandmarkPoint::new(0.42, 0.52);
        hand.landmarks[THUMB_TIP] = LandmarkPoint::new(0.42, 0.45);
        for (tip, base) in FINGER_TIPS_AND_BASES {
            let b = hand.landmarks[base];
            hand.landmarks[tip] = LandmarkPoint::new(b.x, b.y + 0.05);
        }
        hand
    }

    pub fn at_ms(ms: u64) -> Timestamp {
        Duration::from_millis(ms)
    }
}

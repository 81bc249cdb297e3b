//! Playback of recorded landmark streams, standing in for a live camera.
//!
//! A recording is an array of [`Frame`]s with timestamps in seconds, either as
//! JSON or as MessagePack (files ending `.mp` or `.msgpack`).

use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use log::{debug, info};

use crate::{gesture_config::GestureConfig, interfaces::Sensor, landmarks::Frame};

/// Gap assumed between the last frame and the first when looping a
/// recording too short to measure its own frame rate
const DEFAULT_FRAME_GAP: Duration = Duration::from_millis(33);

fn is_msgpack(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("mp") | Some("msgpack")
    )
}

pub fn read_recording(path: &str) -> Result<Vec<Frame>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read recording {}", path))?;
    let frames: Vec<Frame> = if is_msgpack(Path::new(path)) {
        rmp_serde::from_slice(&bytes)
            .with_context(|| format!("failed to decode MessagePack recording {}", path))?
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse JSON recording {}", path))?
    };
    Ok(frames)
}

pub fn write_recording(path: &str, frames: &[Frame]) -> Result<()> {
    let bytes = if is_msgpack(Path::new(path)) {
        rmp_serde::to_vec_named(frames)?
    } else {
        serde_json::to_vec_pretty(frames)?
    };
    fs::write(path, bytes).with_context(|| format!("failed to write recording {}", path))?;
    info!("Wrote {} frames to {}", frames.len(), path);
    Ok(())
}

pub struct ReplaySensor {
    frames: Vec<Frame>,
    speed: f32,
    looping: bool,
    /// Index of the next frame to hand out
    position: usize,
    started: Option<Instant>,
    /// Added to every timestamp; grows by one recording length per loop so
    /// that timestamps keep increasing
    loop_offset: Duration,
    loop_length: Duration,
}

impl ReplaySensor {
    /// Load a recording from disk; see [`ReplaySensor::new`]
    pub fn load(path: &str, config: &GestureConfig, speed: f32, looping: bool) -> Result<Self> {
        let frames = read_recording(path)?;
        info!("Loaded {} frames from recording \"{}\"", frames.len(), path);
        let sensor_settings = config.sensor_settings();
        debug!(
            "Recording stands in for a {}x{} camera",
            sensor_settings.resolution.0, sensor_settings.resolution.1
        );
        Self::new(frames, sensor_settings.detection_confidence, speed, looping)
            .with_context(|| format!("unusable recording {}", path))
    }

    /// Hands scored below `min_confidence` are dropped, as a live estimator
    /// would not have reported them. Frames must be in timestamp order.
    pub fn new(frames: Vec<Frame>, min_confidence: f32, speed: f32, looping: bool) -> Result<Self> {
        if !(speed > 0. && speed.is_finite()) {
            return Err(anyhow!("playback speed must be above 0, got {}", speed));
        }
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return Err(anyhow!("recording has no frames"));
        };
        if let Some(pair) = frames.windows(2).find(|w| w[1].timestamp < w[0].timestamp) {
            return Err(anyhow!(
                "timestamps go backwards ({:?} after {:?})",
                pair[1].timestamp,
                pair[0].timestamp
            ));
        }

        let duration = last.timestamp - first.timestamp;
        let gap = if frames.len() > 1 {
            duration / (frames.len() as u32 - 1)
        } else {
            DEFAULT_FRAME_GAP
        };
        let loop_length = (duration + gap).max(DEFAULT_FRAME_GAP);

        let mut dropped = 0;
        let frames = frames
            .into_iter()
            .map(|frame| {
                let total = frame.hands.len();
                let hands: Vec<_> = frame
                    .hands
                    .into_iter()
                    .filter(|h| h.score.is_none_or(|s| s >= min_confidence))
                    .collect();
                dropped += total - hands.len();
                Frame::new(frame.timestamp, hands)
            })
            .collect::<Vec<_>>();
        if dropped > 0 {
            info!(
                "Dropped {} hand(s) scored below {} from the recording",
                dropped, min_confidence
            );
        }

        Ok(ReplaySensor {
            frames,
            speed,
            looping,
            position: 0,
            started: None,
            loop_offset: Duration::ZERO,
            loop_length,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Recording time (relative to its first frame, across loops) at which
    /// the frame at `index` is due
    fn due_at(&self, index: usize) -> Duration {
        let origin = self.frames[0].timestamp;
        self.frames[index].timestamp - origin + self.loop_offset
    }

    /// Advance to the next frame, wrapping around if looping. Returns `false`
    /// if playback is over.
    fn wrap_if_needed(&mut self) -> bool {
        if self.position < self.frames.len() {
            return true;
        }
        if !self.looping {
            return false;
        }
        self.position = 0;
        self.loop_offset += self.loop_length;
        info!("Recording finished; looping");
        true
    }

    /// The newest frame that is due at `playback` time, skipping older due
    /// frames as a live camera would have
    fn take_due(&mut self, playback: Duration) -> Option<Frame> {
        let mut due = None;
        while self.wrap_if_needed() && self.due_at(self.position) <= playback {
            due = Some((self.position, self.loop_offset));
            self.position += 1;
        }
        let (index, offset) = due?;
        let mut frame = self.frames[index].clone();
        frame.timestamp += offset;
        debug!("Replay frame {} at {:?}", index, frame.timestamp);
        Some(frame)
    }
}

impl Sensor for ReplaySensor {
    fn next_frame(&mut self) -> Option<Frame> {
        let started = *self.started.get_or_insert_with(Instant::now);
        let playback = started.elapsed().mul_f32(self.speed);
        let frame = self.take_due(playback);
        if frame.is_some() && self.is_finished() {
            info!("Recording finished");
        }
        frame
    }

    fn is_finished(&self) -> bool {
        !self.looping && self.position >= self.frames.len()
    }
}

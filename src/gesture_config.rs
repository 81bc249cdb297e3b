use std::{fs, time::Duration};

use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::landmarks::Handedness;

/// How confident the pose estimator must be before a hand is reported
/// (detection) and kept between frames (tracking)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensitivityTier {
    Low,
    Medium,
    High,
}

impl SensitivityTier {
    /// (detection confidence, tracking confidence)
    pub fn confidences(&self) -> (f32, f32) {
        match self {
            SensitivityTier::Low => (0.3, 0.3),
            SensitivityTier::Medium => (0.7, 0.7),
            SensitivityTier::High => (0.9, 0.9),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    Low,
    Medium,
    High,
}

impl ResolutionTier {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ResolutionTier::Low => (640, 480),
            ResolutionTier::Medium => (1280, 720),
            ResolutionTier::High => (1920, 1080),
        }
    }
}

/// What the two-hand thumbs-up trigger does
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TriggerAction {
    /// Start (or end) a drag-resize session on the foreground window
    ToggleResize,
    /// Maximize (or restore) the foreground window
    ToggleMaximize,
}

/// What a pose estimator is configured with when it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSettings {
    pub resolution: (u32, u32),
    pub detection_confidence: f32,
    pub tracking_confidence: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GestureConfig {
    // -------- SENSOR SETTINGS
    /// Confidence tier handed to the pose estimator
    pub sensitivity: SensitivityTier,

    /// Capture resolution requested from the camera
    pub camera_resolution: ResolutionTier,

    // -------- POINTER SETTINGS
    /// How far the pointer moves towards the fingertip each tick
    /// (1.0 is immediate, i.e. no smoothing, 0 is invalid)
    pub smoothing_factor: f32,

    /// Minimum movement (px, on either axis) before a new cursor position is sent;
    /// 0 sends every tick
    pub pointer_dead_zone_px: f32,

    /// Ignore this much of each camera edge (normalised units), so that the whole
    /// screen is reachable without the hand leaving the frame
    pub pointer_region_margin: f32,

    // -------- PINCH SETTINGS
    /// Max normalised distance between thumb tip and fingertip that counts as a pinch
    pub pinch_threshold: f32,

    /// Consecutive frames a pose must be seen before it counts
    pub stable_frames: u32,

    /// How long (ms) a pinch must be held before it becomes a press-and-hold
    /// rather than a click
    pub hold_threshold_ms: u64,

    // -------- TRIGGER SETTINGS
    /// How long (ms) after a two-hand trigger before another may fire;
    /// clicks are also ignored during this window. 0 disables the cooldown
    pub cooldown_ms: u64,

    pub trigger_action: TriggerAction,

    // -------- RESIZE SETTINGS
    /// Window size change per unit of normalised hand displacement, relative
    /// to the size at the start of the session
    pub resize_scale_factor: f32,

    /// Windows are never resized below this (px) on either axis
    pub resize_min_dimension: u32,

    // -------- ENGINE SETTINGS
    /// Which hand drives the pointer when two are visible; if unset (or no hand
    /// carries the label) the first reported hand is used
    pub primary_hand: Option<Handedness>,

    /// How often (ms) the gesture engine looks at the latest frame
    pub tick_interval_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            sensitivity: SensitivityTier::Medium,
            camera_resolution: ResolutionTier::Medium,
            smoothing_factor: 0.8,
            pointer_dead_zone_px: 0.,
            pointer_region_margin: 0.,
            pinch_threshold: 0.04,
            stable_frames: 3,
            hold_threshold_ms: 500,
            cooldown_ms: 1000,
            trigger_action: TriggerAction::ToggleResize,
            resize_scale_factor: 2.0,
            resize_min_dimension: 100,
            primary_hand: None,
            tick_interval_ms: 10,
        }
    }
}

impl GestureConfig {
    /// Reject any setting the engine cannot run with. Called once at startup;
    /// the engine never sees an unvalidated config.
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_factor > 0. && self.smoothing_factor <= 1.) {
            return Err(anyhow!(
                "smoothingFactor must be in (0;1], got {}",
                self.smoothing_factor
            ));
        }
        if !(self.pointer_dead_zone_px >= 0.) {
            return Err(anyhow!(
                "pointerDeadZonePx must not be negative, got {}",
                self.pointer_dead_zone_px
            ));
        }
        if !(self.pointer_region_margin >= 0. && self.pointer_region_margin < 0.5) {
            return Err(anyhow!(
                "pointerRegionMargin must be in [0;0.5), got {}",
                self.pointer_region_margin
            ));
        }
        if !(self.pinch_threshold > 0. && self.pinch_threshold <= 1.) {
            return Err(anyhow!(
                "pinchThreshold must be in (0;1], got {}",
                self.pinch_threshold
            ));
        }
        if self.stable_frames == 0 {
            return Err(anyhow!("stableFrames must be at least 1"));
        }
        if self.hold_threshold_ms == 0 {
            return Err(anyhow!("holdThresholdMs must be above 0"));
        }
        if !(self.resize_scale_factor > 0. && self.resize_scale_factor.is_finite()) {
            return Err(anyhow!(
                "resizeScaleFactor must be above 0, got {}",
                self.resize_scale_factor
            ));
        }
        if self.resize_min_dimension == 0 {
            return Err(anyhow!("resizeMinDimension must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("tickIntervalMs must be at least 1"));
        }
        Ok(())
    }

    pub fn sensor_settings(&self) -> SensorSettings {
        let (detection_confidence, tracking_confidence) = self.sensitivity.confidences();
        SensorSettings {
            resolution: self.camera_resolution.dimensions(),
            detection_confidence,
            tracking_confidence,
        }
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn parse(text: &str) -> Result<GestureConfig> {
        serde_json::from_str::<GestureConfig>(text)
            .map_err(|e| anyhow!("Failed to parse config data: {}", e))
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        debug!("Current state of config: {:?}", self);
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => {
                error!("Error writing config to file: {:?}", e);
                Err(anyhow!("could not write {}: {}", config_file_path, e))
            }
        }
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<GestureConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                warn!(
                    "Gesture config file not found at {}; using defaults",
                    &config_file_path
                );
                Ok(GestureConfig::default())
            } else {
                Err(e).with_context(|| format!("failed to read config from {}", config_file_path))
            }
        }
        Ok(s) => {
            info!("Loaded gesture config OK from \"{}\"", config_file_path);
            let loaded_config = GestureConfig::parse(&s)?;
            debug!("Config parsed data from file: {:?}", &loaded_config);
            Ok(loaded_config)
        }
    }
}

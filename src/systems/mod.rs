pub mod pinch;
pub mod position_remapping;
pub mod resize;
pub mod smoothing;
pub mod trigger;

use log::info;
use pinch::{PinchGestureTracker, PinchSettings};
use position_remapping::PositionRemapping;
use resize::{ResizeController, ResizeSettings};
use smoothing::PointerSmoother;
use trigger::{TriggerSettings, TwoHandTriggerDetector};

use crate::{actions::MouseButton, gesture_config::GestureConfig};

/// Every stateful recogniser, created once from the config and owned by the engine
pub struct Systems {
    pub position_remapping: PositionRemapping,
    pub pointer_smoother: PointerSmoother,
    pub left_click: PinchGestureTracker,
    pub right_click: PinchGestureTracker,
    pub trigger_detector: TwoHandTriggerDetector,
    pub resize_controller: ResizeController,
}

impl Systems {
    pub fn new(config: &GestureConfig) -> Systems {
        let position_remapping = PositionRemapping::new(config.pointer_region_margin);
        if config.pointer_region_margin > 0. {
            info!(
                "Pointer follows the centre of the frame (margin {})",
                config.pointer_region_margin
            );
        }

        let pointer_smoother = PointerSmoother::new(config.smoothing_factor);

        let left_click = PinchGestureTracker::new(
            MouseButton::Left,
            PinchSettings::left_click(
                config.pinch_threshold,
                config.stable_frames,
                config.hold_threshold(),
            ),
        );
        let right_click = PinchGestureTracker::new(
            MouseButton::Right,
            PinchSettings::right_click(
                config.pinch_threshold,
                config.stable_frames,
                config.hold_threshold(),
            ),
        );

        let trigger_detector = TwoHandTriggerDetector::new(TriggerSettings {
            stable_frames: config.stable_frames,
            cooldown: config.cooldown(),
        });

        let resize_controller = ResizeController::new(ResizeSettings {
            scale_factor: config.resize_scale_factor,
            min_dimension: config.resize_min_dimension,
        });

        Systems {
            position_remapping,
            pointer_smoother,
            left_click,
            right_click,
            trigger_detector,
            resize_controller,
        }
    }
}

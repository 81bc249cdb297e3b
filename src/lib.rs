pub mod actions;
pub mod dry_run;
pub mod engine;
pub mod frame_slot;
pub mod geometry_utils;
pub mod gesture_config;
pub mod interfaces;
pub mod landmarks;
pub mod replay;
pub mod runner;
pub mod systems;

pub type Point2D = (f32, f32);

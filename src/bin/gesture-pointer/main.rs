use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use gesture_pointer::{
    dry_run::DryRunActuator,
    gesture_config::{GestureConfig, load_config_from_file},
    replay::ReplaySensor,
    runner,
};

mod cli;
use cli::Cli;

fn apply_overrides(config: &mut GestureConfig, cli: &Cli) {
    if let Some(smoothing) = cli.smoothing {
        config.smoothing_factor = smoothing;
    }
    if let Some(cooldown_ms) = cli.cooldown_ms {
        config.cooldown_ms = cooldown_ms;
    }
    if let Some(trigger_action) = cli.trigger_action {
        config.trigger_action = trigger_action;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    let mut config = load_config_from_file(&cli.config_path)?;
    apply_overrides(&mut config, &cli);
    config
        .validate()
        .with_context(|| format!("invalid gesture config in {}", cli.config_path))?;

    if let Some(path) = &cli.write_config {
        return config.write_config_to_file(path);
    }

    let sensor_settings = config.sensor_settings();
    info!(
        "Sensor: {}x{}, detection confidence {}, tracking confidence {}",
        sensor_settings.resolution.0,
        sensor_settings.resolution.1,
        sensor_settings.detection_confidence,
        sensor_settings.tracking_confidence
    );

    let recording = cli
        .recording
        .as_ref()
        .context("a recording to play back is required")?
        .to_string_lossy();
    let sensor = ReplaySensor::load(&recording, &config, cli.speed, cli.looping)?;
    let mut actuator = DryRunActuator::new((cli.screen_width, cli.screen_height));

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_handler = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_handler.store(true, Ordering::SeqCst);
    })?;

    info!(
        "Running; trigger does {:?}, press Ctrl+C to stop",
        config.trigger_action
    );
    let summary = runner::run(sensor, &mut actuator, &config, shutdown)?;
    debug!("Run summary: {:?}", summary);

    Ok(())
}

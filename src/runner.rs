use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::{
    engine::GestureEngine,
    frame_slot::FrameSlot,
    gesture_config::GestureConfig,
    interfaces::{Actuator, Sensor},
};

/// How long the sensor thread backs off when no frame is ready
const SENSOR_IDLE_SLEEP: Duration = Duration::from_millis(1);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub actions_performed: u64,
}

/// Drive the engine until `shutdown` is set, or until a finite sensor has
/// nothing left and its last frame has been handled.
///
/// The sensor is polled on its own thread and hands frames over through a
/// [`FrameSlot`]; the engine runs on the calling thread at the configured tick
/// rate and only ever sees the newest frame. Any held button is released
/// before returning.
pub fn run<S: Sensor + 'static>(
    mut sensor: S,
    actuator: &mut dyn Actuator,
    config: &GestureConfig,
    shutdown: Arc<AtomicBool>,
) -> Result<RunSummary> {
    let slot = FrameSlot::new();
    let stop_sensor = Arc::new(AtomicBool::new(false));

    let producer = {
        let slot = slot.clone();
        let stop_sensor = stop_sensor.clone();
        thread::Builder::new()
            .name("sensor".into())
            .spawn(move || {
                while !stop_sensor.load(Ordering::SeqCst) {
                    match sensor.next_frame() {
                        Some(frame) => {
                            slot.publish(frame);
                        }
                        None => {
                            if sensor.is_finished() {
                                info!("Sensor has no more frames");
                                break;
                            }
                            thread::sleep(SENSOR_IDLE_SLEEP);
                        }
                    }
                }
                slot.close();
            })?
    };

    let mut engine = GestureEngine::new(config);
    let mut summary = RunSummary::default();
    let mut seen = None;

    loop {
        if shutdown.load(Ordering::SeqCst) {
            info!("Shutdown requested");
            break;
        }

        // Checked before taking the frame, so a frame published just before
        // closing is never missed
        let closed = slot.is_closed();
        match slot.latest_after(seen) {
            Some((sequence, frame)) => {
                if let Some(previous) = seen {
                    if sequence > previous + 1 {
                        debug!("Skipped {} stale frame(s)", sequence - previous - 1);
                    }
                }
                seen = Some(sequence);
                let actions = engine.tick(&frame, actuator);
                summary.frames_processed += 1;
                summary.actions_performed += actions.len() as u64;
            }
            None if closed => break,
            None => {}
        }

        thread::sleep(config.tick_interval());
    }

    let released = engine.release_all(actuator);
    summary.actions_performed += released.len() as u64;

    stop_sensor.store(true, Ordering::SeqCst);
    producer
        .join()
        .map_err(|_| anyhow!("Sensor thread panicked"))?;

    info!(
        "Stopped after {} frames, {} actions",
        summary.frames_processed, summary.actions_performed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, time::Instant};

    use super::*;
    use crate::{
        actions::{Action, MouseButton},
        interfaces::testing::RecordingActuator,
        landmarks::{Frame, MIDDLE_TIP, fixtures::*},
    };

    /// Releases its frames one at a time, no faster than `interval`
    struct ScriptedSensor {
        frames: VecDeque<Frame>,
        interval: Duration,
        last_release: Option<Instant>,
    }

    impl ScriptedSensor {
        fn new(frames: Vec<Frame>, interval: Duration) -> Self {
            ScriptedSensor {
                frames: frames.into(),
                interval,
                last_release: None,
            }
        }
    }

    impl Sensor for ScriptedSensor {
        fn next_frame(&mut self) -> Option<Frame> {
            if let Some(last) = self.last_release {
                if last.elapsed() < self.interval {
                    return None;
                }
            }
            let frame = self.frames.pop_front()?;
            self.last_release = Some(Instant::now());
            Some(frame)
        }

        fn is_finished(&self) -> bool {
            self.frames.is_empty()
        }
    }

    /// Never runs out
    struct EndlessSensor {
        ms: u64,
    }

    impl Sensor for EndlessSensor {
        fn next_frame(&mut self) -> Option<Frame> {
            self.ms += 10;
            thread::sleep(Duration::from_millis(2));
            Some(Frame::new(at_ms(self.ms), vec![neutral_hand()]))
        }
    }

    fn fast_config() -> GestureConfig {
        GestureConfig {
            tick_interval_ms: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_frame_handled_once() {
        let sensor = ScriptedSensor::new(
            vec![Frame::new(at_ms(0), vec![neutral_hand()])],
            Duration::ZERO,
        );
        let mut actuator = RecordingActuator::new();
        let summary = run(
            sensor,
            &mut actuator,
            &fast_config(),
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();

        assert_eq!(summary.frames_processed, 1);
        assert_eq!(actuator.performed.len(), 1);
    }

    #[test]
    fn test_held_button_released_when_sensor_ends() {
        // Pinched for two seconds and never let go
        let frames = (0..200)
            .map(|i| Frame::new(at_ms(i * 10), vec![pinching(MIDDLE_TIP, 0.01)]))
            .collect();
        let sensor = ScriptedSensor::new(frames, Duration::from_millis(3));
        let mut actuator = RecordingActuator::new();
        let summary = run(
            sensor,
            &mut actuator,
            &fast_config(),
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();

        assert!(summary.frames_processed > 3);
        assert_eq!(
            actuator.discrete(),
            vec![
                Action::MouseDown(MouseButton::Left),
                Action::MouseUp(MouseButton::Left)
            ]
        );
        assert_eq!(summary.actions_performed, actuator.performed.len() as u64);
    }

    #[test]
    fn test_shutdown_flag_stops_endless_sensor() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let trigger = shutdown.clone();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            trigger.store(true, Ordering::SeqCst);
        });

        let mut actuator = RecordingActuator::new();
        let summary = run(
            EndlessSensor { ms: 0 },
            &mut actuator,
            &fast_config(),
            shutdown,
        )
        .unwrap();
        stopper.join().unwrap();

        assert!(summary.frames_processed > 0);
    }
}

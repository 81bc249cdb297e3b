//! The two boundaries of the gesture core: where landmark frames come from,
//! and where actions go.

use log::debug;

use crate::{
    actions::{Action, MouseButton},
    landmarks::Frame,
};

/// Source of hand landmark frames (a pose estimator watching a camera, a
/// recording, ...). Polled in a loop by the producer thread.
pub trait Sensor: Send {
    /// The newest frame since the last call, or `None` if nothing new is
    /// available yet. Must return promptly; never waits for the next frame.
    fn next_frame(&mut self) -> Option<Frame>;

    /// A finite source (such as a recording) reports when it has nothing left
    fn is_finished(&self) -> bool {
        false
    }
}

/// Host OS pointer and window control.
///
/// All calls are fire-and-forget: an implementation that cannot carry out a
/// call (no foreground window, request rejected by the OS) logs it and returns.
pub trait Actuator {
    fn move_cursor(&mut self, x: i32, y: i32);
    fn mouse_down(&mut self, button: MouseButton);
    fn mouse_up(&mut self, button: MouseButton);
    fn click(&mut self, button: MouseButton);
    fn resize_foreground_window(&mut self, width: u32, height: u32);
    fn toggle_maximize_foreground_window(&mut self);

    /// Current (width, height) of the foreground window, if there is one
    fn foreground_window_size(&self) -> Option<(u32, u32)>;

    /// (width, height) of the screen the pointer moves on
    fn screen_size(&self) -> (u32, u32);

    fn perform(&mut self, action: &Action) {
        debug!("Perform {:?}", action);
        match *action {
            Action::MoveCursor { x, y } => self.move_cursor(x, y),
            Action::MouseDown(button) => self.mouse_down(button),
            Action::MouseUp(button) => self.mouse_up(button),
            Action::Click(button) => self.click(button),
            Action::ResizeWindow { width, height } => self.resize_foreground_window(width, height),
            Action::ToggleMaximize => self.toggle_maximize_foreground_window(),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Remembers every call as the action that would have produced it
    pub struct RecordingActuator {
        pub performed: Vec<Action>,
        pub window: Option<(u32, u32)>,
    }

    impl RecordingActuator {
        pub fn new() -> Self {
            RecordingActuator {
                performed: Vec::new(),
                window: Some((800, 600)),
            }
        }

        /// Everything except cursor movement
        pub fn discrete(&self) -> Vec<Action> {
            without_moves(&self.performed)
        }
    }

    pub fn without_moves(actions: &[Action]) -> Vec<Action> {
        actions
            .iter()
            .filter(|a| !matches!(a, Action::MoveCursor { .. }))
            .cloned()
            .collect()
    }

    impl Actuator for RecordingActuator {
        fn move_cursor(&mut self, x: i32, y: i32) {
            self.performed.push(Action::MoveCursor { x, y });
        }
        fn mouse_down(&mut self, button: MouseButton) {
            self.performed.push(Action::MouseDown(button));
        }
        fn mouse_up(&mut self, button: MouseButton) {
            self.performed.push(Action::MouseUp(button));
        }
        fn click(&mut self, button: MouseButton) {
            self.performed.push(Action::Click(button));
        }
        fn resize_foreground_window(&mut self, width: u32, height: u32) {
            self.performed.push(Action::ResizeWindow { width, height });
        }
        fn toggle_maximize_foreground_window(&mut self) {
            self.performed.push(Action::ToggleMaximize);
        }
        fn foreground_window_size(&self) -> Option<(u32, u32)> {
            self.window
        }
        fn screen_size(&self) -> (u32, u32) {
            (1000, 1000)
        }
    }

    #[test]
    fn test_perform_dispatches_each_action() {
        let mut actuator = RecordingActuator::new();
        let actions = [
            Action::MoveCursor { x: 3, y: 4 },
            Action::MouseDown(MouseButton::Left),
            Action::MouseUp(MouseButton::Left),
            Action::Click(MouseButton::Right),
            Action::ResizeWindow {
                width: 640,
                height: 480,
            },
            Action::ToggleMaximize,
        ];
        for action in actions.iter() {
            actuator.perform(action);
        }
        assert_eq!(actuator.performed, actions.to_vec());
    }
}

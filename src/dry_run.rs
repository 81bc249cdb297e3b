use log::{info, warn};

use crate::{actions::MouseButton, interfaces::Actuator};

pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// An Actuator that only logs, for running without any OS integration.
///
/// Keeps a pretend foreground window so that resizing and maximizing have an
/// observable effect on later calls.
pub struct DryRunActuator {
    screen_size: (u32, u32),
    cursor: (i32, i32),
    window: Option<(u32, u32)>,
    /// Size to restore to when un-maximizing
    restore_size: Option<(u32, u32)>,
    buttons_down: Vec<MouseButton>,
}

impl DryRunActuator {
    pub fn new(screen_size: (u32, u32)) -> Self {
        DryRunActuator {
            screen_size,
            cursor: (0, 0),
            window: Some(DEFAULT_WINDOW_SIZE),
            restore_size: None,
            buttons_down: Vec::new(),
        }
    }

    /// No foreground window at all
    pub fn without_window(screen_size: (u32, u32)) -> Self {
        DryRunActuator {
            window: None,
            ..Self::new(screen_size)
        }
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn is_maximized(&self) -> bool {
        self.restore_size.is_some()
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

impl Actuator for DryRunActuator {
    fn move_cursor(&mut self, x: i32, y: i32) {
        let (w, h) = self.screen_size;
        self.cursor = (
            x.clamp(0, (w as i32 - 1).max(0)),
            y.clamp(0, (h as i32 - 1).max(0)),
        );
    }

    fn mouse_down(&mut self, button: MouseButton) {
        if self.is_down(button) {
            warn!("{:?} button is already down", button);
            return;
        }
        info!("[dry run] {:?} down at {:?}", button, self.cursor);
        self.buttons_down.push(button);
    }

    fn mouse_up(&mut self, button: MouseButton) {
        if !self.is_down(button) {
            warn!("{:?} button is not down", button);
            return;
        }
        info!("[dry run] {:?} up at {:?}", button, self.cursor);
        self.buttons_down.retain(|b| *b != button);
    }

    fn click(&mut self, button: MouseButton) {
        info!("[dry run] {:?} click at {:?}", button, self.cursor);
    }

    fn resize_foreground_window(&mut self, width: u32, height: u32) {
        match self.window.as_mut() {
            Some(size) => {
                *size = (width, height);
                self.restore_size = None;
                info!("[dry run] window resized to {}x{}", width, height);
            }
            None => warn!("No foreground window to resize"),
        }
    }

    fn toggle_maximize_foreground_window(&mut self) {
        let Some(size) = self.window else {
            warn!("No foreground window to maximize");
            return;
        };
        match self.restore_size.take() {
            Some(restored) => {
                self.window = Some(restored);
                info!("[dry run] window restored to {}x{}", restored.0, restored.1);
            }
            None => {
                self.restore_size = Some(size);
                self.window = Some(self.screen_size);
                info!("[dry run] window maximized");
            }
        }
    }

    fn foreground_window_size(&self) -> Option<(u32, u32)> {
        self.window
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;

    #[test]
    fn test_cursor_clamped_to_screen() {
        let mut actuator = DryRunActuator::new((1920, 1080));
        actuator.move_cursor(-5, 5000);
        assert_eq!(actuator.cursor(), (0, 1079));
        actuator.perform(&Action::MoveCursor { x: 100, y: 200 });
        assert_eq!(actuator.cursor(), (100, 200));
    }

    #[test]
    fn test_resize_changes_window() {
        let mut actuator = DryRunActuator::new((1920, 1080));
        assert_eq!(actuator.foreground_window_size(), Some(DEFAULT_WINDOW_SIZE));
        actuator.perform(&Action::ResizeWindow {
            width: 640,
            height: 400,
        });
        assert_eq!(actuator.foreground_window_size(), Some((640, 400)));
    }

    #[test]
    fn test_maximize_toggles_and_restores() {
        let mut actuator = DryRunActuator::new((1920, 1080));
        actuator.toggle_maximize_foreground_window();
        assert!(actuator.is_maximized());
        assert_eq!(actuator.foreground_window_size(), Some((1920, 1080)));
        actuator.toggle_maximize_foreground_window();
        assert!(!actuator.is_maximized());
        assert_eq!(actuator.foreground_window_size(), Some(DEFAULT_WINDOW_SIZE));
    }

    #[test]
    fn test_no_window() {
        let mut actuator = DryRunActuator::without_window((800, 600));
        actuator.toggle_maximize_foreground_window();
        actuator.resize_foreground_window(100, 100);
        assert_eq!(actuator.foreground_window_size(), None);
        assert!(!actuator.is_maximized());
    }

    #[test]
    fn test_button_state() {
        let mut actuator = DryRunActuator::new((800, 600));
        actuator.perform(&Action::MouseDown(MouseButton::Left));
        assert!(actuator.is_down(MouseButton::Left));
        assert!(!actuator.is_down(MouseButton::Right));
        actuator.perform(&Action::MouseUp(MouseButton::Left));
        assert!(!actuator.is_down(MouseButton::Left));
        // Unmatched release is ignored
        actuator.mouse_up(MouseButton::Right);
    }
}

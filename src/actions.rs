use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Lifecycle events of a single pinch
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Pinch released before the hold threshold
    Click,
    /// Pinch held past the hold threshold; the button goes down
    PressStart,
    /// A held pinch was released; the button comes up
    PressEnd,
}

impl ClickAction {
    pub fn for_button(self, button: MouseButton) -> Action {
        match self {
            ClickAction::Click => Action::Click(button),
            ClickAction::PressStart => Action::MouseDown(button),
            ClickAction::PressEnd => Action::MouseUp(button),
        }
    }
}

/// Everything the engine can ask of the host
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Action {
    MoveCursor { x: i32, y: i32 },
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    Click(MouseButton),
    ResizeWindow { width: u32, height: u32 },
    ToggleMaximize,
}

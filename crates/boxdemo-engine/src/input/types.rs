/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Snapshot of the held mouse buttons, delivered with every pointer callback.
///
/// Left is the primary button and right the secondary one. Stored as booleans
/// rather than bitflags to keep it explicit.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ButtonMask {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl ButtonMask {
    pub const NONE: Self = Self { left: false, right: false, middle: false };
    pub const LEFT: Self = Self { left: true, right: false, middle: false };
    pub const RIGHT: Self = Self { left: false, right: true, middle: false };

    pub fn primary(&self) -> bool {
        self.left
    }

    pub fn secondary(&self) -> bool {
        self.right
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.middle
    }

    /// Returns whether `button` is held. Buttons outside the mask are never held.
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
            _ => false,
        }
    }
}

/// Pointer move event in physical client-area pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PointerMoveEvent {
    pub x: i32,
    pub y: i32,
}

/// Pointer button event.
///
/// Coordinates are the last known pointer position, in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: i32,
    pub y: i32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

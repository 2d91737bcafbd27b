use std::collections::HashSet;

use super::types::{
    ButtonMask,
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current pointer state for the window.
///
/// Holds "is down" information and the last known pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(i32, i32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    ///
    /// Returns `true` when the event changed which buttons are held.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f && !self.buttons_down.is_empty() {
                    // Avoids stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                    return true;
                }
                false
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                false
            }

            // The last position is kept: a drag can continue outside the window.
            InputEvent::PointerLeft => false,

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Snapshot of the held buttons in the form scene callbacks receive.
    pub fn button_mask(&self) -> ButtonMask {
        ButtonMask {
            left: self.button_down(MouseButton::Left),
            right: self.button_down(MouseButton::Right),
            middle: self.button_down(MouseButton::Middle),
        }
    }

    /// Last known pointer position, or the origin before any pointer event.
    pub fn pointer_or_origin(&self) -> (i32, i32) {
        self.pointer_pos.unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: i32, y: i32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Released,
            x: 0,
            y: 0,
        })
    }

    #[test]
    fn press_and_release_update_mask() {
        let mut s = InputState::default();
        assert!(s.apply_event(&press(MouseButton::Left, 3, 4)));
        assert_eq!(s.button_mask(), ButtonMask::LEFT);
        assert_eq!(s.pointer_pos, Some((3, 4)));

        assert!(s.apply_event(&release(MouseButton::Left)));
        assert_eq!(s.button_mask(), ButtonMask::NONE);
    }

    #[test]
    fn repeated_press_is_not_a_change() {
        let mut s = InputState::default();
        assert!(s.apply_event(&press(MouseButton::Right, 0, 0)));
        assert!(!s.apply_event(&press(MouseButton::Right, 0, 0)));
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Left, 0, 0));
        s.apply_event(&press(MouseButton::Right, 0, 0));

        assert!(s.apply_event(&InputEvent::Focused(false)));
        assert!(!s.button_mask().any());
        assert!(!s.focused);
    }

    #[test]
    fn pointer_left_keeps_last_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 10, y: 20 }));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_or_origin(), (10, 20));
    }
}

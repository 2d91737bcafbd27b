//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window events into `InputEvent`s; the runtime
//! applies them to an `InputState` and forwards pointer callbacks to the scene.

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{
    ButtonMask,
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer and
//! the scene.

mod capture;
mod runtime;

pub use capture::WindowCapture;
pub use runtime::{Runtime, RuntimeConfig};

//! Rotating colored cube with an orbit camera.
//!
//! [`scene::BoxScene`] is the frame orchestrator. It owns the cube geometry,
//! the color program and the per-object constant buffer, and is driven by the
//! engine runtime through the `Scene` trait.

pub mod camera;
pub mod constants;
pub mod geometry;
pub mod program;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_support;

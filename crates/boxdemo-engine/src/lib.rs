//! Box demo engine crate.
//!
//! Owns the platform, GPU and shader-compilation pieces a scene is driven by:
//! the winit runtime, the `GraphicsDevice` contract with its wgpu backend, and
//! the `ShaderCompiler` contract with its naga backend.

pub mod core;
pub mod device;
pub mod gfx;
pub mod input;
pub mod shader;
pub mod time;
pub mod window;

pub mod logging;

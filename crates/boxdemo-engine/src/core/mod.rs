//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the scene it drives. The runtime owns the window, device and compiler; a
//! [`Scene`] owns its GPU resources and receives the device explicitly on
//! every call that needs it.

mod capture;
mod error;
mod scene;

pub use capture::PointerCapture;
pub use error::{FrameError, InitError};
pub use scene::Scene;

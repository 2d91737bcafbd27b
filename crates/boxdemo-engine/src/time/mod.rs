//! Time subsystem.
//!
//! Provides frame timing utilities without coupling to the runtime:
//! - `FrameClock`: call `tick()` once per presented frame to obtain `FrameTime`
//! - `FrameStats`: feed it every `dt` to get a once-per-second fps report

mod frame_clock;
mod frame_stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_stats::{FrameStats, FrameStatsReport};

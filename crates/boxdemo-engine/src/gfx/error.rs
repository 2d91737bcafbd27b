use thiserror::Error;

use crate::device::SurfaceErrorAction;

/// Failures reported by a [`GraphicsDevice`](super::GraphicsDevice).
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("invalid descriptor for `{label}`: {reason}")]
    InvalidDescriptor { label: String, reason: String },

    #[error("failed to create {what}: {reason}")]
    Creation { what: &'static str, reason: String },

    #[error("buffer `{label}` is not CPU-writable")]
    NotMappable { label: String },

    #[error("buffer `{label}` is not mapped")]
    NotMapped { label: String },

    #[error("buffer `{label}` is still mapped")]
    StillMapped { label: String },

    #[error("input layout does not feed vertex shader input @location({location})")]
    InputSignatureMismatch { location: u32 },

    #[error("draw issued without a bound {missing}")]
    IncompleteState { missing: &'static str },

    #[error("draw range {start}..{end} exceeds index buffer of {available} indices")]
    IndexRange { start: u32, end: u32, available: u32 },

    #[error("back buffer unavailable ({action:?}): {reason}")]
    Surface { action: SurfaceErrorAction, reason: String },
}

impl DeviceError {
    /// True for surface hiccups (outdated, timeout) that skipping a frame resolves.
    pub fn is_transient(&self) -> bool {
        matches!(self, DeviceError::Surface { action, .. } if !action.is_fatal())
    }
}

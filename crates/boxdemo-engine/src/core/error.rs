use thiserror::Error;

use crate::gfx::DeviceError;
use crate::shader::{CompileError, ShaderStage};

/// Scene initialization failure. Always fatal.
#[derive(Debug, Error)]
pub enum InitError {
    /// A GPU resource could not be created.
    #[error("failed to create {resource}")]
    Resource {
        resource: &'static str,
        #[source]
        source: DeviceError,
    },

    /// A shader entry point failed to compile.
    #[error("failed to compile {stage} shader `{entry_point}`")]
    ShaderCompile {
        stage: ShaderStage,
        entry_point: String,
        #[source]
        source: CompileError,
    },

    /// Compiled bytecode was rejected by the device.
    #[error("failed to create {stage} shader object")]
    ShaderObject {
        stage: ShaderStage,
        #[source]
        source: DeviceError,
    },
}

impl InitError {
    /// Wraps a device error with the name of the resource being created.
    pub fn resource(resource: &'static str) -> impl FnOnce(DeviceError) -> Self {
        move |source| InitError::Resource { resource, source }
    }
}

/// Failure of one frame step.
#[derive(Debug, Error)]
#[error("frame step `{step}` failed")]
pub struct FrameError {
    pub step: &'static str,
    #[source]
    pub source: DeviceError,
}

impl FrameError {
    /// Wraps a device error with the name of the failing step.
    pub fn at(step: &'static str) -> impl FnOnce(DeviceError) -> Self {
        move |source| FrameError { step, source }
    }

    /// True when skipping this frame is enough to recover.
    pub fn is_transient(&self) -> bool {
        self.source.is_transient()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::device::SurfaceErrorAction;

    #[test]
    fn init_error_names_the_resource() {
        let err = InitError::resource("box vertex buffer")(DeviceError::Creation {
            what: "buffer",
            reason: "out of memory".into(),
        });

        assert_eq!(err.to_string(), "failed to create box vertex buffer");
        assert!(err.source().is_some());
    }

    #[test]
    fn frame_error_transience_follows_device_error() {
        let skip = FrameError::at("present")(DeviceError::Surface {
            action: SurfaceErrorAction::SkipFrame,
            reason: "timeout".into(),
        });
        let fatal = FrameError::at("draw")(DeviceError::IncompleteState { missing: "pixel shader" });

        assert!(skip.is_transient());
        assert!(!fatal.is_transient());
        assert_eq!(fatal.to_string(), "frame step `draw` failed");
    }
}

//! Graphics device contract.
//!
//! Scenes talk to the GPU through [`GraphicsDevice`], an immediate-context
//! style interface: create buffers/shaders/layouts up front, then per frame
//! clear, bind state, upload constants, draw and present. The device is passed
//! explicitly to whoever needs it; nothing reaches for a global context.
//!
//! [`WgpuDevice`] is the production backend. Tests substitute a recording
//! double that keeps buffer memory on the host.

mod desc;
mod device;
mod error;
mod wgpu_device;

pub use desc::{
    BindKind,
    BufferDesc,
    BufferUsage,
    IndexFormat,
    InputElement,
    InputStep,
    PrimitiveTopology,
    VertexFormat,
};
pub use device::GraphicsDevice;
pub use error::DeviceError;
pub use wgpu_device::{WgpuBuffer, WgpuDevice, WgpuInputLayout, WgpuShader};

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use boxdemo_engine::core::InitError;
use boxdemo_engine::gfx::{BindKind, BufferDesc, BufferUsage, DeviceError, GraphicsDevice};

/// Per-object shader constants.
///
/// Stored column-major, the layout WGSL reads a `mat4x4<f32>` uniform in.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    pub world_view_proj: [[f32; 4]; 4],
}

impl ObjectConstants {
    pub const SIZE: u64 = std::mem::size_of::<ObjectConstants>() as u64;

    pub fn new(world_view_proj: Mat4) -> Self {
        Self {
            world_view_proj: world_view_proj.to_cols_array_2d(),
        }
    }
}

pub const CONSTANT_BUFFER: &str = "object constant buffer";

/// Dynamic uniform buffer holding one [`ObjectConstants`].
pub struct ConstantBuffer<D: GraphicsDevice> {
    buffer: D::Buffer,
}

impl<D: GraphicsDevice> ConstantBuffer<D> {
    pub fn new(device: &mut D) -> Result<Self, InitError> {
        let buffer = device
            .create_buffer(
                &BufferDesc {
                    label: CONSTANT_BUFFER,
                    size: ObjectConstants::SIZE,
                    usage: BufferUsage::Dynamic,
                    bind: BindKind::Constant,
                },
                None,
            )
            .map_err(InitError::resource(CONSTANT_BUFFER))?;

        Ok(Self { buffer })
    }

    pub fn buffer(&self) -> &D::Buffer {
        &self.buffer
    }

    /// Replaces the buffer contents: map with discard, copy, unmap.
    pub fn upload(&self, device: &mut D, constants: &ObjectConstants) -> Result<(), DeviceError> {
        let bytes = bytemuck::bytes_of(constants);

        let mapped = device.map_write_discard(&self.buffer)?;
        let copied = match mapped.get_mut(..bytes.len()) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                true
            }
            None => false,
        };

        // Unmap on both paths; a buffer left mapped blocks every later draw.
        device.unmap(&self.buffer)?;

        if !copied {
            return Err(DeviceError::InvalidDescriptor {
                label: CONSTANT_BUFFER.to_string(),
                reason: format!("mapped region is smaller than {} bytes", bytes.len()),
            });
        }
        Ok(())
    }
}

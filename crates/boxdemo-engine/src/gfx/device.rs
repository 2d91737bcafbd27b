use crate::shader::ShaderBytecode;

use super::{BufferDesc, DeviceError, IndexFormat, InputElement, PrimitiveTopology};

/// Immediate-context graphics device.
///
/// Handles returned by the `create_*` methods are owned by the caller and
/// release their GPU object when dropped. Binding methods record state for the
/// next draw; they never fail on their own, problems surface at `draw_indexed`.
pub trait GraphicsDevice {
    type Buffer;
    type VertexShader;
    type PixelShader;
    type InputLayout;

    /// Creates a buffer. Immutable buffers take their full contents here.
    fn create_buffer(
        &mut self,
        desc: &BufferDesc<'_>,
        initial: Option<&[u8]>,
    ) -> Result<Self::Buffer, DeviceError>;

    fn create_vertex_shader(
        &mut self,
        bytecode: &ShaderBytecode,
    ) -> Result<Self::VertexShader, DeviceError>;

    fn create_pixel_shader(
        &mut self,
        bytecode: &ShaderBytecode,
    ) -> Result<Self::PixelShader, DeviceError>;

    /// Creates an input layout, checked against the vertex shader's inputs.
    fn create_input_layout(
        &mut self,
        elements: &[InputElement],
        vs_bytecode: &ShaderBytecode,
    ) -> Result<Self::InputLayout, DeviceError>;

    /// Maps a dynamic buffer for writing with discard semantics.
    ///
    /// The returned slice covers the whole buffer and starts zeroed; previous
    /// contents are not preserved. Must be paired with [`unmap`](Self::unmap).
    fn map_write_discard(&mut self, buffer: &Self::Buffer) -> Result<&mut [u8], DeviceError>;

    /// Ends a mapping and hands the written bytes to the GPU.
    fn unmap(&mut self, buffer: &Self::Buffer) -> Result<(), DeviceError>;

    fn clear_render_target(&mut self, rgba: [f32; 4]) -> Result<(), DeviceError>;
    fn clear_depth_stencil(&mut self, depth: f32, stencil: u32) -> Result<(), DeviceError>;

    fn set_input_layout(&mut self, layout: &Self::InputLayout);
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);
    fn set_vertex_buffer(&mut self, slot: u32, buffer: &Self::Buffer, stride: u32, offset: u64);
    fn set_index_buffer(&mut self, buffer: &Self::Buffer, format: IndexFormat, offset: u64);
    fn set_vertex_shader(&mut self, shader: &Self::VertexShader);
    fn set_pixel_shader(&mut self, shader: &Self::PixelShader);
    fn set_vs_constant_buffer(&mut self, slot: u32, buffer: &Self::Buffer);

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), DeviceError>;

    /// Presents the frame. `sync_interval == 0` presents without waiting for vsync.
    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError>;
}

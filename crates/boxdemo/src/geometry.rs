use bytemuck::{Pod, Zeroable};

use boxdemo_engine::core::InitError;
use boxdemo_engine::gfx::{BindKind, BufferDesc, BufferUsage, GraphicsDevice};

/// Cube corner: position in local space plus an RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const STRIDE: u32 = std::mem::size_of::<Vertex>() as u32;

    const fn new(pos: [f32; 3], color: [f32; 4]) -> Self {
        Self { pos, color }
    }
}

/// Named colors used by the demo.
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: [f32; 4] = [0.0, 0.501_960_8, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const LIGHT_STEEL_BLUE: [f32; 4] = [0.690_196, 0.768_627, 0.870_588, 1.0];
}

pub const VERTICES: [Vertex; 8] = [
    Vertex::new([-1.0, -1.0, -1.0], colors::WHITE),
    Vertex::new([-1.0, 1.0, -1.0], colors::BLACK),
    Vertex::new([1.0, 1.0, -1.0], colors::RED),
    Vertex::new([1.0, -1.0, -1.0], colors::GREEN),
    Vertex::new([-1.0, -1.0, 1.0], colors::BLUE),
    Vertex::new([-1.0, 1.0, 1.0], colors::YELLOW),
    Vertex::new([1.0, 1.0, 1.0], colors::CYAN),
    Vertex::new([1.0, -1.0, 1.0], colors::MAGENTA),
];

/// Two triangles per face, clockwise when seen from outside the cube.
#[rustfmt::skip]
pub const INDICES: [u32; 36] = [
    // front
    0, 1, 2,
    0, 2, 3,
    // back
    4, 6, 5,
    4, 7, 6,
    // left
    4, 5, 1,
    4, 1, 0,
    // right
    3, 2, 6,
    3, 6, 7,
    // top
    1, 5, 6,
    1, 6, 2,
    // bottom
    4, 0, 3,
    4, 3, 7,
];

pub const VERTEX_BUFFER: &str = "box vertex buffer";
pub const INDEX_BUFFER: &str = "box index buffer";

/// Immutable GPU copies of [`VERTICES`] and [`INDICES`].
pub struct BoxGeometry<D: GraphicsDevice> {
    pub vertex_buffer: D::Buffer,
    pub index_buffer: D::Buffer,
    pub index_count: u32,
}

impl<D: GraphicsDevice> BoxGeometry<D> {
    pub fn upload(device: &mut D) -> Result<Self, InitError> {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&VERTICES);
        let vertex_buffer = device
            .create_buffer(
                &BufferDesc {
                    label: VERTEX_BUFFER,
                    size: vertex_bytes.len() as u64,
                    usage: BufferUsage::Immutable,
                    bind: BindKind::Vertex,
                },
                Some(vertex_bytes),
            )
            .map_err(InitError::resource(VERTEX_BUFFER))?;

        let index_bytes: &[u8] = bytemuck::cast_slice(&INDICES);
        let index_buffer = device
            .create_buffer(
                &BufferDesc {
                    label: INDEX_BUFFER,
                    size: index_bytes.len() as u64,
                    usage: BufferUsage::Immutable,
                    bind: BindKind::Index,
                },
                Some(index_bytes),
            )
            .map_err(InitError::resource(INDEX_BUFFER))?;

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: INDICES.len() as u32,
        })
    }
}

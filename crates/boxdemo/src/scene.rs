use std::f32::consts::PI;

use glam::Mat4;

use boxdemo_engine::core::{FrameError, InitError, PointerCapture, Scene};
use boxdemo_engine::gfx::{GraphicsDevice, IndexFormat, PrimitiveTopology};
use boxdemo_engine::input::ButtonMask;
use boxdemo_engine::shader::ShaderCompiler;

use crate::camera::{OrbitCamera, OrbitController};
use crate::constants::{ConstantBuffer, ObjectConstants};
use crate::geometry::{BoxGeometry, Vertex, colors};
use crate::program::ColorProgram;

pub const CLEAR_COLOR: [f32; 4] = colors::LIGHT_STEEL_BLUE;

pub const FOV_Y: f32 = 0.25 * PI;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 1000.0;

/// Left-handed perspective projection with depth mapped to `0..=1`.
pub fn projection(aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_lh(FOV_Y, aspect_ratio, Z_NEAR, Z_FAR)
}

/// The rotating cube.
///
/// Owns every GPU resource of the demo; they are released when the scene is
/// dropped, including when [`Scene::init`] fails partway.
pub struct BoxScene<D: GraphicsDevice> {
    geometry: BoxGeometry<D>,
    program: ColorProgram<D>,
    constants: ConstantBuffer<D>,

    controller: OrbitController,

    world: Mat4,
    view: Mat4,
    proj: Mat4,
}

impl<D: GraphicsDevice> BoxScene<D> {
    pub fn camera(&self) -> &OrbitCamera {
        &self.controller.camera
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    /// Column-vector composition: world is applied first.
    pub fn world_view_proj(&self) -> Mat4 {
        self.proj * self.view * self.world
    }
}

impl<D: GraphicsDevice> Scene<D> for BoxScene<D> {
    fn init(
        device: &mut D,
        compiler: &dyn ShaderCompiler,
        aspect_ratio: f32,
    ) -> Result<Self, InitError> {
        let geometry = BoxGeometry::upload(device)?;
        let constants = ConstantBuffer::new(device)?;
        let program = ColorProgram::build(device, compiler)?;

        let controller = OrbitController::default();
        let view = controller.view_matrix();

        Ok(Self {
            geometry,
            program,
            constants,
            controller,
            world: Mat4::IDENTITY,
            view,
            proj: projection(aspect_ratio),
        })
    }

    fn resize(&mut self, aspect_ratio: f32) {
        self.proj = projection(aspect_ratio);
    }

    fn update(&mut self, _dt: f32) {
        self.view = self.controller.view_matrix();
    }

    fn draw(&mut self, device: &mut D) -> Result<(), FrameError> {
        device
            .clear_render_target(CLEAR_COLOR)
            .map_err(FrameError::at("clear render target"))?;
        device
            .clear_depth_stencil(1.0, 0)
            .map_err(FrameError::at("clear depth-stencil"))?;

        self.program.bind_input_layout(device);
        device.set_primitive_topology(PrimitiveTopology::TriangleList);
        device.set_vertex_buffer(0, &self.geometry.vertex_buffer, Vertex::STRIDE, 0);
        device.set_index_buffer(&self.geometry.index_buffer, IndexFormat::U32, 0);

        self.program.bind_shaders(device);

        let constants = ObjectConstants::new(self.world_view_proj());
        self.constants
            .upload(device, &constants)
            .map_err(FrameError::at("upload constants"))?;
        device.set_vs_constant_buffer(0, self.constants.buffer());

        device
            .draw_indexed(self.geometry.index_count, 0, 0)
            .map_err(FrameError::at("draw"))?;

        device.present(0).map_err(FrameError::at("present"))
    }

    fn on_mouse_down(&mut self, _buttons: ButtonMask, x: i32, y: i32, capture: &mut dyn PointerCapture) {
        self.controller.on_drag_start(x, y, capture);
    }

    fn on_mouse_up(&mut self, _buttons: ButtonMask, _x: i32, _y: i32, capture: &mut dyn PointerCapture) {
        self.controller.on_drag_end(capture);
    }

    fn on_mouse_move(&mut self, buttons: ButtonMask, x: i32, y: i32) {
        self.controller.on_drag_move(buttons, x, y);
    }
}

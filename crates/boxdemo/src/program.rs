use boxdemo_engine::core::InitError;
use boxdemo_engine::gfx::{GraphicsDevice, InputElement, InputStep, VertexFormat};
use boxdemo_engine::shader::{ShaderBytecode, ShaderCompiler, ShaderSource, ShaderStage, ShaderTarget};

pub const COLOR_SHADER: ShaderSource = ShaderSource::Embedded {
    name: "color.wgsl",
    wgsl: include_str!("shaders/color.wgsl"),
};

pub const VS_ENTRY: &str = "vs_main";
pub const PS_ENTRY: &str = "fs_main";

pub const INPUT_LAYOUT: &str = "input layout";

/// Vertex input layout matching [`Vertex`](crate::geometry::Vertex).
///
/// Element `i` feeds shader `@location(i)`.
pub const INPUT_ELEMENTS: [InputElement; 2] = [
    InputElement {
        semantic: "POSITION",
        semantic_index: 0,
        format: VertexFormat::Float32x3,
        input_slot: 0,
        offset: 0,
        step: InputStep::PerVertex,
    },
    InputElement {
        semantic: "COLOR",
        semantic_index: 0,
        format: VertexFormat::Float32x4,
        input_slot: 0,
        offset: 12,
        step: InputStep::PerVertex,
    },
];

/// Bytecode for both stages of the color program.
pub struct CompiledShaders {
    pub vertex: ShaderBytecode,
    pub pixel: ShaderBytecode,
}

impl CompiledShaders {
    pub fn compile(
        compiler: &dyn ShaderCompiler,
        source: &ShaderSource,
    ) -> Result<Self, InitError> {
        let vertex = compile_stage(compiler, source, VS_ENTRY, ShaderTarget::VERTEX)?;
        let pixel = compile_stage(compiler, source, PS_ENTRY, ShaderTarget::PIXEL)?;
        Ok(Self { vertex, pixel })
    }
}

fn compile_stage(
    compiler: &dyn ShaderCompiler,
    source: &ShaderSource,
    entry_point: &str,
    target: ShaderTarget,
) -> Result<ShaderBytecode, InitError> {
    compiler
        .compile(source, entry_point, target)
        .map_err(|source| InitError::ShaderCompile {
            stage: target.stage,
            entry_point: entry_point.to_string(),
            source,
        })
}

/// Shader objects and input layout of the color program.
pub struct ColorProgram<D: GraphicsDevice> {
    vertex_shader: D::VertexShader,
    pixel_shader: D::PixelShader,
    input_layout: D::InputLayout,
}

impl<D: GraphicsDevice> ColorProgram<D> {
    /// Compiles [`COLOR_SHADER`] and creates the device objects for it.
    pub fn build(device: &mut D, compiler: &dyn ShaderCompiler) -> Result<Self, InitError> {
        let shaders = CompiledShaders::compile(compiler, &COLOR_SHADER)?;
        Self::from_bytecode(device, &shaders)
    }

    pub fn from_bytecode(device: &mut D, shaders: &CompiledShaders) -> Result<Self, InitError> {
        let vertex_shader = device
            .create_vertex_shader(&shaders.vertex)
            .map_err(|source| InitError::ShaderObject {
                stage: ShaderStage::Vertex,
                source,
            })?;

        let pixel_shader = device
            .create_pixel_shader(&shaders.pixel)
            .map_err(|source| InitError::ShaderObject {
                stage: ShaderStage::Pixel,
                source,
            })?;

        let input_layout = device
            .create_input_layout(&INPUT_ELEMENTS, &shaders.vertex)
            .map_err(InitError::resource(INPUT_LAYOUT))?;

        log::debug!("color program ready");

        Ok(Self {
            vertex_shader,
            pixel_shader,
            input_layout,
        })
    }

    pub fn bind_input_layout(&self, device: &mut D) {
        device.set_input_layout(&self.input_layout);
    }

    pub fn bind_shaders(&self, device: &mut D) {
        device.set_vertex_shader(&self.vertex_shader);
        device.set_pixel_shader(&self.pixel_shader);
    }
}

#[cfg(test)]
mod tests {
    use boxdemo_engine::shader::{ShaderInput, WgslCompiler};

    use super::*;
    use crate::geometry::Vertex;
    use crate::test_support::{FailingCompiler, RecordingDevice};

    #[test]
    fn input_elements_cover_the_vertex() {
        let last = INPUT_ELEMENTS[1];
        assert_eq!(last.offset + last.format.size(), Vertex::STRIDE);
        assert_eq!(
            std::mem::offset_of!(Vertex, color) as u32,
            INPUT_ELEMENTS[1].offset
        );
    }

    #[test]
    fn color_shader_compiles_for_both_stages() {
        let shaders = CompiledShaders::compile(&WgslCompiler::new(), &COLOR_SHADER).unwrap();

        assert_eq!(shaders.vertex.stage, ShaderStage::Vertex);
        assert_eq!(shaders.pixel.stage, ShaderStage::Pixel);
        assert_eq!(
            shaders.vertex.inputs,
            vec![
                ShaderInput { location: 0, components: 3 },
                ShaderInput { location: 1, components: 4 },
            ]
        );
    }

    #[test]
    fn layout_formats_match_shader_inputs() {
        let shaders = CompiledShaders::compile(&WgslCompiler::new(), &COLOR_SHADER).unwrap();
        for input in &shaders.vertex.inputs {
            let el = INPUT_ELEMENTS[input.location as usize];
            assert_eq!(el.format.components(), input.components, "{}", el.semantic);
        }
    }

    #[test]
    fn compile_failure_identifies_the_stage() {
        let compiler = FailingCompiler::new(ShaderStage::Pixel);
        let err = CompiledShaders::compile(&compiler, &COLOR_SHADER).err().unwrap();

        match err {
            InitError::ShaderCompile { stage, entry_point, .. } => {
                assert_eq!(stage, ShaderStage::Pixel);
                assert_eq!(entry_point, PS_ENTRY);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shader_object_failure_identifies_the_stage() {
        let mut device = RecordingDevice::new();
        device.fail_creation_of("vertex shader");

        let err = ColorProgram::build(&mut device, &WgslCompiler::new()).err().unwrap();
        assert!(matches!(err, InitError::ShaderObject { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn build_binds_nothing() {
        let mut device = RecordingDevice::new();
        ColorProgram::build(&mut device, &WgslCompiler::new()).unwrap();
        assert!(device.commands.is_empty());
    }
}

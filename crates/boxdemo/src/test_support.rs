//! Test doubles for the engine collaborators.

use std::rc::{Rc, Weak};

use boxdemo_engine::core::PointerCapture;
use boxdemo_engine::gfx::{
    BufferDesc, BufferUsage, DeviceError, GraphicsDevice, IndexFormat, InputElement,
    PrimitiveTopology,
};
use boxdemo_engine::shader::{
    CompileError, ShaderBytecode, ShaderCompiler, ShaderSource, ShaderStage, ShaderTarget,
    WgslCompiler,
};

/// Handle handed out by [`RecordingDevice`]. Dropping every clone releases it.
#[derive(Debug, Clone)]
pub struct FakeHandle {
    id: usize,
    _alive: Rc<()>,
}

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ClearRenderTarget([f32; 4]),
    ClearDepthStencil(f32, u32),
    SetInputLayout(usize),
    SetPrimitiveTopology(PrimitiveTopology),
    SetVertexBuffer { slot: u32, buffer: usize, stride: u32, offset: u64 },
    SetIndexBuffer { buffer: usize, format: IndexFormat, offset: u64 },
    SetVertexShader(usize),
    SetPixelShader(usize),
    SetVsConstantBuffer { slot: u32, buffer: usize },
    Map(usize),
    Unmap(usize),
    DrawIndexed { count: u32, start: u32, base_vertex: i32 },
    Present(u32),
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::ClearRenderTarget(_) => "clear_render_target",
            Command::ClearDepthStencil(..) => "clear_depth_stencil",
            Command::SetInputLayout(_) => "set_input_layout",
            Command::SetPrimitiveTopology(_) => "set_primitive_topology",
            Command::SetVertexBuffer { .. } => "set_vertex_buffer",
            Command::SetIndexBuffer { .. } => "set_index_buffer",
            Command::SetVertexShader(_) => "set_vertex_shader",
            Command::SetPixelShader(_) => "set_pixel_shader",
            Command::SetVsConstantBuffer { .. } => "set_vs_constant_buffer",
            Command::Map(_) => "map",
            Command::Unmap(_) => "unmap",
            Command::DrawIndexed { .. } => "draw_indexed",
            Command::Present(_) => "present",
        }
    }
}

struct BufferRecord {
    label: String,
    usage: BufferUsage,
    data: Vec<u8>,
    mapped: bool,
    alive: Weak<()>,
}

/// [`GraphicsDevice`] that keeps buffer memory in host vectors and records
/// every command.
///
/// Creation of a named resource can be made to fail: buffers by label, the
/// rest by `"vertex shader"`, `"pixel shader"` and `"input layout"`.
#[derive(Default)]
pub struct RecordingDevice {
    pub commands: Vec<Command>,
    buffers: Vec<BufferRecord>,
    next_object: usize,
    fail_on: Option<String>,
    fail_draw: Option<DeviceError>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_creation_of(&mut self, name: &str) {
        self.fail_on = Some(name.to_string());
    }

    pub fn fail_next_draw(&mut self, err: DeviceError) {
        self.fail_draw = Some(err);
    }

    pub fn buffer_data(&self, buffer: &FakeHandle) -> &[u8] {
        &self.buffers[buffer.id].data
    }

    pub fn is_mapped(&self, buffer: &FakeHandle) -> bool {
        self.buffers[buffer.id].mapped
    }

    /// Re-creates a handle for a live buffer with the given label.
    pub fn buffer_by_label(&self, label: &str) -> Option<FakeHandle> {
        self.buffers.iter().enumerate().find_map(|(id, b)| {
            let alive = b.alive.upgrade()?;
            (b.label == label).then_some(FakeHandle { id, _alive: alive })
        })
    }

    /// Buffers whose handles have not all been dropped.
    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().filter(|b| b.alive.strong_count() > 0).count()
    }

    fn check_injected(&self, name: &str) -> Result<(), DeviceError> {
        match &self.fail_on {
            Some(target) if target == name => Err(DeviceError::Creation {
                what: "resource",
                reason: format!("injected failure for {name}"),
            }),
            _ => Ok(()),
        }
    }

    fn object(&mut self) -> FakeHandle {
        self.next_object += 1;
        FakeHandle {
            id: self.next_object,
            _alive: Rc::new(()),
        }
    }
}

impl GraphicsDevice for RecordingDevice {
    type Buffer = FakeHandle;
    type VertexShader = FakeHandle;
    type PixelShader = FakeHandle;
    type InputLayout = FakeHandle;

    fn create_buffer(
        &mut self,
        desc: &BufferDesc<'_>,
        initial: Option<&[u8]>,
    ) -> Result<FakeHandle, DeviceError> {
        self.check_injected(desc.label)?;
        desc.validate(initial)
            .map_err(|reason| DeviceError::InvalidDescriptor {
                label: desc.label.to_string(),
                reason,
            })?;

        let alive = Rc::new(());
        self.buffers.push(BufferRecord {
            label: desc.label.to_string(),
            usage: desc.usage,
            data: initial.map_or_else(|| vec![0; desc.size as usize], <[u8]>::to_vec),
            mapped: false,
            alive: Rc::downgrade(&alive),
        });

        Ok(FakeHandle {
            id: self.buffers.len() - 1,
            _alive: alive,
        })
    }

    fn create_vertex_shader(&mut self, bytecode: &ShaderBytecode) -> Result<FakeHandle, DeviceError> {
        self.check_injected("vertex shader")?;
        assert_eq!(bytecode.stage, ShaderStage::Vertex);
        Ok(self.object())
    }

    fn create_pixel_shader(&mut self, bytecode: &ShaderBytecode) -> Result<FakeHandle, DeviceError> {
        self.check_injected("pixel shader")?;
        assert_eq!(bytecode.stage, ShaderStage::Pixel);
        Ok(self.object())
    }

    fn create_input_layout(
        &mut self,
        elements: &[InputElement],
        vs_bytecode: &ShaderBytecode,
    ) -> Result<FakeHandle, DeviceError> {
        self.check_injected("input layout")?;
        if let Some(missing) = vs_bytecode
            .inputs
            .iter()
            .find(|i| i.location as usize >= elements.len())
        {
            return Err(DeviceError::InputSignatureMismatch { location: missing.location });
        }
        Ok(self.object())
    }

    fn map_write_discard(&mut self, buffer: &FakeHandle) -> Result<&mut [u8], DeviceError> {
        self.commands.push(Command::Map(buffer.id));

        let record = &mut self.buffers[buffer.id];
        if record.usage != BufferUsage::Dynamic {
            return Err(DeviceError::NotMappable { label: record.label.clone() });
        }
        if record.mapped {
            return Err(DeviceError::StillMapped { label: record.label.clone() });
        }

        record.mapped = true;
        record.data.fill(0);
        Ok(&mut record.data)
    }

    fn unmap(&mut self, buffer: &FakeHandle) -> Result<(), DeviceError> {
        self.commands.push(Command::Unmap(buffer.id));

        let record = &mut self.buffers[buffer.id];
        if !record.mapped {
            return Err(DeviceError::NotMapped { label: record.label.clone() });
        }
        record.mapped = false;
        Ok(())
    }

    fn clear_render_target(&mut self, rgba: [f32; 4]) -> Result<(), DeviceError> {
        self.commands.push(Command::ClearRenderTarget(rgba));
        Ok(())
    }

    fn clear_depth_stencil(&mut self, depth: f32, stencil: u32) -> Result<(), DeviceError> {
        self.commands.push(Command::ClearDepthStencil(depth, stencil));
        Ok(())
    }

    fn set_input_layout(&mut self, layout: &FakeHandle) {
        self.commands.push(Command::SetInputLayout(layout.id));
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.commands.push(Command::SetPrimitiveTopology(topology));
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &FakeHandle, stride: u32, offset: u64) {
        self.commands.push(Command::SetVertexBuffer {
            slot,
            buffer: buffer.id,
            stride,
            offset,
        });
    }

    fn set_index_buffer(&mut self, buffer: &FakeHandle, format: IndexFormat, offset: u64) {
        self.commands.push(Command::SetIndexBuffer {
            buffer: buffer.id,
            format,
            offset,
        });
    }

    fn set_vertex_shader(&mut self, shader: &FakeHandle) {
        self.commands.push(Command::SetVertexShader(shader.id));
    }

    fn set_pixel_shader(&mut self, shader: &FakeHandle) {
        self.commands.push(Command::SetPixelShader(shader.id));
    }

    fn set_vs_constant_buffer(&mut self, slot: u32, buffer: &FakeHandle) {
        self.commands.push(Command::SetVsConstantBuffer {
            slot,
            buffer: buffer.id,
        });
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), DeviceError> {
        if let Some(err) = self.fail_draw.take() {
            return Err(err);
        }
        self.commands.push(Command::DrawIndexed {
            count: index_count,
            start: start_index,
            base_vertex,
        });
        Ok(())
    }

    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError> {
        self.commands.push(Command::Present(sync_interval));
        Ok(())
    }
}

/// Records pointer capture calls.
#[derive(Debug, Default)]
pub struct CaptureProbe {
    pub acquired: u32,
    pub released: u32,
    pub held: bool,
}

impl PointerCapture for CaptureProbe {
    fn acquire(&mut self) {
        self.acquired += 1;
        self.held = true;
    }

    fn release(&mut self) {
        self.released += 1;
        self.held = false;
    }
}

/// Fails compilation for one stage and defers to [`WgslCompiler`] otherwise.
pub struct FailingCompiler {
    stage: ShaderStage,
    inner: WgslCompiler,
}

impl FailingCompiler {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            inner: WgslCompiler::new(),
        }
    }
}

impl ShaderCompiler for FailingCompiler {
    fn compile(
        &self,
        source: &ShaderSource,
        entry_point: &str,
        target: ShaderTarget,
    ) -> Result<ShaderBytecode, CompileError> {
        if target.stage == self.stage {
            return Err(CompileError::Parse {
                name: source.name().into_owned(),
                diagnostic: "injected failure".into(),
            });
        }
        self.inner.compile(source, entry_point, target)
    }
}

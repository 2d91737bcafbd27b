use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::device::{DepthTarget, Gpu, GpuFrame};
use crate::shader::{ShaderBytecode, ShaderStage};

use super::{
    BindKind, BufferDesc, BufferUsage, DeviceError, GraphicsDevice, IndexFormat, InputElement,
    InputStep, PrimitiveTopology, VertexFormat,
};

/// GPU buffer owned by the caller.
#[derive(Debug, Clone)]
pub struct WgpuBuffer {
    id: u64,
    label: String,
    raw: wgpu::Buffer,
    size: u64,
    usage: BufferUsage,
}

/// Shader object. The same type backs both stages; the device keeps them apart.
#[derive(Debug, Clone)]
pub struct WgpuShader {
    id: u64,
    stage: ShaderStage,
    module: wgpu::ShaderModule,
    entry_point: String,
}

#[derive(Debug, Clone)]
pub struct WgpuInputLayout {
    id: u64,
    attributes: Vec<wgpu::VertexAttribute>,
    step: wgpu::VertexStepMode,
}

#[derive(Debug, Clone)]
struct BoundVertexBuffer {
    buffer: WgpuBuffer,
    stride: u32,
    offset: u64,
}

#[derive(Debug, Clone)]
struct BoundIndexBuffer {
    buffer: WgpuBuffer,
    format: IndexFormat,
    offset: u64,
}

/// State recorded by the `set_*` calls, consumed by `draw_indexed`.
#[derive(Debug, Clone, Default)]
struct Bindings {
    layout: Option<WgpuInputLayout>,
    topology: PrimitiveTopology,
    vertex: Option<BoundVertexBuffer>,
    index: Option<BoundIndexBuffer>,
    vs: Option<WgpuShader>,
    ps: Option<WgpuShader>,
    constants: Option<WgpuBuffer>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    vs: u64,
    ps: u64,
    layout: u64,
    topology: PrimitiveTopology,
    strip_index_format: Option<IndexFormat>,
    stride: u32,
    constants: bool,
    color_format: wgpu::TextureFormat,
}

/// [`GraphicsDevice`] over wgpu.
///
/// wgpu bakes shaders, vertex layout and topology into immutable pipeline
/// objects, so bindings are recorded and resolved into a cached
/// `RenderPipeline` at draw time. The back buffer is acquired lazily by the
/// first clear or draw of a frame and released by `present`.
pub struct WgpuDevice {
    gpu: Gpu,
    depth: DepthTarget,

    /// Non-vsync mode used for `present(0)`.
    no_vsync_mode: wgpu::PresentMode,

    constants_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    bind_groups: HashMap<u64, wgpu::BindGroup>,

    /// Host shadows of dynamic buffers; written while mapped, uploaded on unmap.
    staging: HashMap<u64, Vec<u8>>,
    mapped: HashSet<u64>,

    bound: Bindings,
    frame: Option<GpuFrame>,
    next_id: u64,
}

impl WgpuDevice {
    /// Only slot 0 is backed: the constants bind group has a single binding.
    pub const CONSTANT_BUFFER_SLOTS: u32 = 1;

    pub fn new(gpu: Gpu) -> Self {
        let size = gpu.size();
        let depth = DepthTarget::new(gpu.device(), size.width, size.height);

        let constants_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("boxdemo constants bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let no_vsync_mode = match gpu.present_mode() {
            wgpu::PresentMode::Immediate | wgpu::PresentMode::Mailbox => gpu.present_mode(),
            _ => wgpu::PresentMode::AutoNoVsync,
        };

        Self {
            gpu,
            depth,
            no_vsync_mode,
            constants_layout,
            pipelines: HashMap::new(),
            bind_groups: HashMap::new(),
            staging: HashMap::new(),
            mapped: HashSet::new(),
            bound: Bindings::default(),
            frame: None,
            next_id: 1,
        }
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    /// Width over height of the drawable area; `None` while it is empty.
    pub fn aspect_ratio(&self) -> Option<f32> {
        let size = self.gpu.size();
        (size.width > 0 && size.height > 0).then(|| size.width as f32 / size.height as f32)
    }

    /// Resizes the surface and the depth target.
    ///
    /// Any frame in flight is dropped unpresented. Returns whether the surface
    /// was reconfigured (false for a 0x0 size).
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> bool {
        self.discard_frame();

        if !self.gpu.resize(new_size) {
            return false;
        }

        self.depth
            .resize(self.gpu.device(), new_size.width, new_size.height);
        true
    }

    /// Drops a partially recorded frame without presenting it.
    pub fn discard_frame(&mut self) {
        if self.frame.take().is_some() {
            log::debug!("discarding unpresented frame");
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn ensure_frame(&mut self) -> Result<&mut GpuFrame, DeviceError> {
        if self.frame.is_none() {
            let frame = match self.gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    let action = self.gpu.handle_surface_error(&err);
                    return Err(DeviceError::Surface {
                        action,
                        reason: err.to_string(),
                    });
                }
            };
            self.frame = Some(frame);
        }

        // Populated above.
        self.frame.as_mut().ok_or(DeviceError::IncompleteState {
            missing: "back buffer",
        })
    }

    fn create_shader(
        &mut self,
        bytecode: &ShaderBytecode,
        stage: ShaderStage,
        what: &'static str,
    ) -> Result<WgpuShader, DeviceError> {
        if bytecode.stage != stage {
            return Err(DeviceError::Creation {
                what,
                reason: format!(
                    "`{}` is {} bytecode",
                    bytecode.entry_point, bytecode.stage
                ),
            });
        }
        if bytecode.words.is_empty() {
            return Err(DeviceError::Creation {
                what,
                reason: "empty bytecode".into(),
            });
        }

        let label = format!("{}:{}", bytecode.source_name, bytecode.entry_point);
        let module = self
            .gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::SpirV(Cow::Borrowed(&bytecode.words)),
            });

        log::debug!("created {what} {label}");

        Ok(WgpuShader {
            id: self.next_id(),
            stage,
            module,
            entry_point: bytecode.entry_point.clone(),
        })
    }

    fn pipeline(
        &mut self,
        key: PipelineKey,
        bound: &Bindings,
    ) -> Result<wgpu::RenderPipeline, DeviceError> {
        if let Some(p) = self.pipelines.get(&key) {
            return Ok(p.clone());
        }

        let (Some(vs), Some(ps), Some(layout)) = (&bound.vs, &bound.ps, &bound.layout) else {
            return Err(DeviceError::IncompleteState { missing: "pipeline stage" });
        };

        let device = self.gpu.device();

        let constants_layout = [&self.constants_layout];
        let bind_group_layouts: &[&wgpu::BindGroupLayout] = if key.constants {
            &constants_layout
        } else {
            &[]
        };

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("boxdemo pipeline layout"),
            bind_group_layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("boxdemo pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs.module,
                entry_point: Some(&vs.entry_point),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: u64::from(key.stride),
                    step_mode: layout.step,
                    attributes: &layout.attributes,
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &ps.module,
                entry_point: Some(&ps.entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Clockwise front faces with back-face culling, as the index data is authored.
            primitive: wgpu::PrimitiveState {
                topology: map_topology(key.topology),
                strip_index_format: key.strip_index_format.map(map_index_format),
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTarget::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("built pipeline for {key:?}");
        self.pipelines.insert(key, pipeline.clone());
        Ok(pipeline)
    }

    fn bind_group(&mut self, buffer: &WgpuBuffer) -> wgpu::BindGroup {
        if let Some(bg) = self.bind_groups.get(&buffer.id) {
            return bg.clone();
        }

        let bg = self
            .gpu
            .device()
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("boxdemo constants bind group"),
                layout: &self.constants_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.raw.as_entire_binding(),
                }],
            });

        self.bind_groups.insert(buffer.id, bg.clone());
        bg
    }
}

impl GraphicsDevice for WgpuDevice {
    type Buffer = WgpuBuffer;
    type VertexShader = WgpuShader;
    type PixelShader = WgpuShader;
    type InputLayout = WgpuInputLayout;

    fn create_buffer(
        &mut self,
        desc: &BufferDesc<'_>,
        initial: Option<&[u8]>,
    ) -> Result<WgpuBuffer, DeviceError> {
        desc.validate(initial)
            .map_err(|reason| DeviceError::InvalidDescriptor {
                label: desc.label.to_string(),
                reason,
            })?;

        let bind_usage = match desc.bind {
            BindKind::Vertex => wgpu::BufferUsages::VERTEX,
            BindKind::Index => wgpu::BufferUsages::INDEX,
            BindKind::Constant => wgpu::BufferUsages::UNIFORM,
        };

        let device = self.gpu.device();
        let raw = match (desc.usage, initial) {
            (BufferUsage::Immutable, Some(contents)) => {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(desc.label),
                    contents,
                    usage: bind_usage,
                })
            }
            _ => device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(desc.label),
                size: desc.size,
                usage: bind_usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };

        let id = self.next_id();
        if desc.usage == BufferUsage::Dynamic {
            self.staging.insert(id, vec![0; desc.size as usize]);
        }

        log::debug!("created buffer `{}` ({} bytes, {:?})", desc.label, desc.size, desc.usage);

        Ok(WgpuBuffer {
            id,
            label: desc.label.to_string(),
            raw,
            size: desc.size,
            usage: desc.usage,
        })
    }

    fn create_vertex_shader(&mut self, bytecode: &ShaderBytecode) -> Result<WgpuShader, DeviceError> {
        self.create_shader(bytecode, ShaderStage::Vertex, "vertex shader")
    }

    fn create_pixel_shader(&mut self, bytecode: &ShaderBytecode) -> Result<WgpuShader, DeviceError> {
        self.create_shader(bytecode, ShaderStage::Pixel, "pixel shader")
    }

    fn create_input_layout(
        &mut self,
        elements: &[InputElement],
        vs_bytecode: &ShaderBytecode,
    ) -> Result<WgpuInputLayout, DeviceError> {
        let (attributes, step) = translate_layout(elements, vs_bytecode)?;

        Ok(WgpuInputLayout {
            id: self.next_id(),
            attributes,
            step,
        })
    }

    fn map_write_discard(&mut self, buffer: &WgpuBuffer) -> Result<&mut [u8], DeviceError> {
        if buffer.usage != BufferUsage::Dynamic {
            return Err(DeviceError::NotMappable { label: buffer.label.clone() });
        }
        if !self.mapped.insert(buffer.id) {
            return Err(DeviceError::StillMapped { label: buffer.label.clone() });
        }

        let shadow = self
            .staging
            .entry(buffer.id)
            .or_insert_with(|| vec![0; buffer.size as usize]);
        shadow.fill(0);
        Ok(shadow.as_mut_slice())
    }

    fn unmap(&mut self, buffer: &WgpuBuffer) -> Result<(), DeviceError> {
        if !self.mapped.remove(&buffer.id) {
            return Err(DeviceError::NotMapped { label: buffer.label.clone() });
        }

        if let Some(shadow) = self.staging.get(&buffer.id) {
            // Queued writes land before any command buffer submitted after them.
            self.gpu.queue().write_buffer(&buffer.raw, 0, shadow);
        }
        Ok(())
    }

    fn clear_render_target(&mut self, rgba: [f32; 4]) -> Result<(), DeviceError> {
        let frame = self.ensure_frame()?;

        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("boxdemo clear color"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(rgba[0]),
                        g: f64::from(rgba[1]),
                        b: f64::from(rgba[2]),
                        a: f64::from(rgba[3]),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        Ok(())
    }

    fn clear_depth_stencil(&mut self, depth: f32, stencil: u32) -> Result<(), DeviceError> {
        self.ensure_frame()?;
        let (Some(frame), depth_view) = (self.frame.as_mut(), &self.depth.view) else {
            return Err(DeviceError::IncompleteState { missing: "back buffer" });
        };

        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("boxdemo clear depth-stencil"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(stencil),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        Ok(())
    }

    fn set_input_layout(&mut self, layout: &WgpuInputLayout) {
        self.bound.layout = Some(layout.clone());
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.bound.topology = topology;
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &WgpuBuffer, stride: u32, offset: u64) {
        if slot != 0 {
            log::warn!("vertex buffer slot {slot} ignored; only slot 0 is supported");
            return;
        }
        self.bound.vertex = Some(BoundVertexBuffer {
            buffer: buffer.clone(),
            stride,
            offset,
        });
    }

    fn set_index_buffer(&mut self, buffer: &WgpuBuffer, format: IndexFormat, offset: u64) {
        self.bound.index = Some(BoundIndexBuffer {
            buffer: buffer.clone(),
            format,
            offset,
        });
    }

    fn set_vertex_shader(&mut self, shader: &WgpuShader) {
        debug_assert_eq!(shader.stage, ShaderStage::Vertex);
        self.bound.vs = Some(shader.clone());
    }

    fn set_pixel_shader(&mut self, shader: &WgpuShader) {
        debug_assert_eq!(shader.stage, ShaderStage::Pixel);
        self.bound.ps = Some(shader.clone());
    }

    fn set_vs_constant_buffer(&mut self, slot: u32, buffer: &WgpuBuffer) {
        if slot >= Self::CONSTANT_BUFFER_SLOTS {
            log::warn!("constant buffer slot {slot} ignored; only slot 0 is supported");
            return;
        }
        self.bound.constants = Some(buffer.clone());
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), DeviceError> {
        let bound = self.bound.clone();

        let missing = |missing: &'static str| DeviceError::IncompleteState { missing };
        let layout = bound.layout.as_ref().ok_or_else(|| missing("input layout"))?;
        let vertex = bound.vertex.as_ref().ok_or_else(|| missing("vertex buffer"))?;
        let index = bound.index.as_ref().ok_or_else(|| missing("index buffer"))?;
        let vs = bound.vs.as_ref().ok_or_else(|| missing("vertex shader"))?;
        let ps = bound.ps.as_ref().ok_or_else(|| missing("pixel shader"))?;

        let index_bytes = index.buffer.size.saturating_sub(index.offset);
        let available = (index_bytes / u64::from(index.format.size())) as u32;
        let end = start_index.saturating_add(index_count);
        if end > available {
            return Err(DeviceError::IndexRange { start: start_index, end, available });
        }

        if let Some(constants) = &bound.constants {
            if self.mapped.contains(&constants.id) {
                return Err(DeviceError::StillMapped { label: constants.label.clone() });
            }
        }

        let key = PipelineKey {
            vs: vs.id,
            ps: ps.id,
            layout: layout.id,
            topology: bound.topology,
            strip_index_format: matches!(
                bound.topology,
                PrimitiveTopology::LineStrip | PrimitiveTopology::TriangleStrip
            )
            .then_some(index.format),
            stride: vertex.stride,
            constants: bound.constants.is_some(),
            color_format: self.gpu.surface_format(),
        };

        let pipeline = self.pipeline(key, &bound)?;
        let bind_group = bound.constants.as_ref().map(|c| self.bind_group(c));

        self.ensure_frame()?;
        let (Some(frame), depth_view) = (self.frame.as_mut(), &self.depth.view) else {
            return Err(DeviceError::IncompleteState { missing: "back buffer" });
        };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("boxdemo draw"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&pipeline);
        if let Some(bg) = &bind_group {
            rpass.set_bind_group(0, bg, &[]);
        }
        rpass.set_vertex_buffer(0, vertex.buffer.raw.slice(vertex.offset..));
        rpass.set_index_buffer(index.buffer.raw.slice(index.offset..), map_index_format(index.format));
        rpass.draw_indexed(start_index..end, base_vertex, 0..1);

        Ok(())
    }

    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError> {
        let Some(frame) = self.frame.take() else {
            log::debug!("present without recorded work; nothing to show");
            return Ok(());
        };

        self.gpu.submit(frame);

        // wgpu fixes the present mode at surface configuration; apply a change
        // for the next frame.
        let mode = if sync_interval == 0 {
            self.no_vsync_mode
        } else {
            wgpu::PresentMode::Fifo
        };
        self.gpu.set_present_mode(mode);

        Ok(())
    }
}

/// Builds wgpu vertex attributes from layout elements, checking them against
/// the vertex shader's input signature.
fn translate_layout(
    elements: &[InputElement],
    vs_bytecode: &ShaderBytecode,
) -> Result<(Vec<wgpu::VertexAttribute>, wgpu::VertexStepMode), DeviceError> {
    let invalid = |reason: String| DeviceError::InvalidDescriptor {
        label: "input layout".into(),
        reason,
    };

    let first = elements.first().ok_or_else(|| invalid("no input elements".into()))?;

    if vs_bytecode.stage != ShaderStage::Vertex {
        return Err(invalid(format!(
            "`{}` is not vertex bytecode",
            vs_bytecode.entry_point
        )));
    }

    let mut attributes = Vec::with_capacity(elements.len());
    for (location, el) in elements.iter().enumerate() {
        if el.input_slot != 0 {
            return Err(invalid(format!("{} uses input slot {}", el.semantic, el.input_slot)));
        }
        if el.step != first.step {
            return Err(invalid(format!("{} mixes step rates", el.semantic)));
        }

        attributes.push(wgpu::VertexAttribute {
            format: map_vertex_format(el.format),
            offset: u64::from(el.offset),
            shader_location: location as u32,
        });
    }

    for input in &vs_bytecode.inputs {
        if input.location as usize >= elements.len() {
            return Err(DeviceError::InputSignatureMismatch { location: input.location });
        }
    }

    let step = match first.step {
        InputStep::PerVertex => wgpu::VertexStepMode::Vertex,
        InputStep::PerInstance => wgpu::VertexStepMode::Instance,
    };

    Ok((attributes, step))
}

fn map_vertex_format(f: VertexFormat) -> wgpu::VertexFormat {
    match f {
        VertexFormat::Float32 => wgpu::VertexFormat::Float32,
        VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

fn map_index_format(f: IndexFormat) -> wgpu::IndexFormat {
    match f {
        IndexFormat::U16 => wgpu::IndexFormat::Uint16,
        IndexFormat::U32 => wgpu::IndexFormat::Uint32,
    }
}

fn map_topology(t: PrimitiveTopology) -> wgpu::PrimitiveTopology {
    match t {
        PrimitiveTopology::PointList => wgpu::PrimitiveTopology::PointList,
        PrimitiveTopology::LineList => wgpu::PrimitiveTopology::LineList,
        PrimitiveTopology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        PrimitiveTopology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        PrimitiveTopology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderInput;

    fn vs(inputs: &[u32]) -> ShaderBytecode {
        ShaderBytecode {
            stage: ShaderStage::Vertex,
            entry_point: "vs_main".into(),
            source_name: "test".into(),
            words: vec![0x0723_0203],
            inputs: inputs
                .iter()
                .map(|&location| ShaderInput { location, components: 4 })
                .collect(),
        }
    }

    fn element(semantic: &'static str, format: VertexFormat, offset: u32) -> InputElement {
        InputElement {
            semantic,
            semantic_index: 0,
            format,
            input_slot: 0,
            offset,
            step: InputStep::PerVertex,
        }
    }

    #[test]
    fn layout_maps_elements_to_locations_in_order() {
        let elements = [
            element("POSITION", VertexFormat::Float32x3, 0),
            element("COLOR", VertexFormat::Float32x4, 12),
        ];
        let (attrs, step) = translate_layout(&elements, &vs(&[0, 1])).unwrap();

        assert_eq!(step, wgpu::VertexStepMode::Vertex);
        assert_eq!(attrs[0].shader_location, 0);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(attrs[1].offset, 12);
    }

    #[test]
    fn layout_must_feed_every_shader_input() {
        let elements = [element("POSITION", VertexFormat::Float32x3, 0)];
        let err = translate_layout(&elements, &vs(&[0, 1])).unwrap_err();
        assert!(matches!(err, DeviceError::InputSignatureMismatch { location: 1 }));
    }

    #[test]
    fn layout_rejects_pixel_bytecode() {
        let mut bc = vs(&[0]);
        bc.stage = ShaderStage::Pixel;
        let elements = [element("POSITION", VertexFormat::Float32x3, 0)];
        assert!(translate_layout(&elements, &bc).is_err());
    }

    #[test]
    fn layout_rejects_empty_and_multi_slot() {
        assert!(translate_layout(&[], &vs(&[])).is_err());

        let mut el = element("POSITION", VertexFormat::Float32x3, 0);
        el.input_slot = 1;
        assert!(translate_layout(&[el], &vs(&[0])).is_err());
    }
}

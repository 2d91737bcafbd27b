use naga::back::spv;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{
    CompileError, ShaderBytecode, ShaderCompiler, ShaderInput, ShaderSource, ShaderStage,
    ShaderTarget,
};

/// naga-backed compiler: parses and validates WGSL, then emits SPIR-V for a
/// single entry point.
#[derive(Debug, Default, Clone)]
pub struct WgslCompiler {
    _priv: (),
}

impl WgslCompiler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShaderCompiler for WgslCompiler {
    fn compile(
        &self,
        source: &ShaderSource,
        entry_point: &str,
        target: ShaderTarget,
    ) -> Result<ShaderBytecode, CompileError> {
        let name = source.name().into_owned();
        let text = source.load()?;

        let module = naga::front::wgsl::parse_str(&text).map_err(|e| CompileError::Parse {
            name: name.clone(),
            diagnostic: e.emit_to_string(&text),
        })?;

        let info = Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .map_err(|e| CompileError::Validation {
                name: name.clone(),
                diagnostic: e.emit_to_string(&text),
            })?;

        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == entry_point)
            .ok_or_else(|| CompileError::MissingEntryPoint {
                name: name.clone(),
                entry_point: entry_point.to_string(),
            })?;

        if ep.stage != naga_stage(target.stage) {
            return Err(CompileError::WrongStage {
                name,
                entry_point: entry_point.to_string(),
                expected: target.stage,
            });
        }

        let mut options = spv::Options::default();
        // wgpu reads SPIR-V in its own clip-space convention; the Vulkan y-flip
        // is applied by wgpu's backend, not here.
        options
            .flags
            .remove(spv::WriterFlags::ADJUST_COORDINATE_SPACE);

        let pipeline_options = spv::PipelineOptions {
            shader_stage: ep.stage,
            entry_point: entry_point.to_string(),
        };

        let words = spv::write_vec(&module, &info, &options, Some(&pipeline_options)).map_err(
            |e| CompileError::Emit {
                name: name.clone(),
                entry_point: entry_point.to_string(),
                reason: e.to_string(),
            },
        )?;

        let inputs = match target.stage {
            ShaderStage::Vertex => vertex_inputs(&module, ep),
            ShaderStage::Pixel => Vec::new(),
        };

        log::debug!(
            "compiled {name}:{entry_point} ({}, {} bytes)",
            target.profile,
            words.len() * 4
        );

        Ok(ShaderBytecode {
            stage: target.stage,
            entry_point: entry_point.to_string(),
            source_name: name,
            words,
            inputs,
        })
    }
}

fn naga_stage(stage: ShaderStage) -> naga::ShaderStage {
    match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Pixel => naga::ShaderStage::Fragment,
    }
}

/// Collects `@location` inputs of a vertex entry point, including those
/// nested one level inside a struct argument.
fn vertex_inputs(module: &naga::Module, ep: &naga::EntryPoint) -> Vec<ShaderInput> {
    let mut inputs = Vec::new();

    for arg in &ep.function.arguments {
        match &arg.binding {
            Some(binding) => push_location(&mut inputs, binding, &module.types[arg.ty].inner),
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner {
                    for member in members {
                        if let Some(binding) = &member.binding {
                            push_location(&mut inputs, binding, &module.types[member.ty].inner);
                        }
                    }
                }
            }
        }
    }

    inputs.sort_by_key(|i| i.location);
    inputs
}

fn push_location(out: &mut Vec<ShaderInput>, binding: &naga::Binding, ty: &naga::TypeInner) {
    let naga::Binding::Location { location, .. } = binding else {
        return;
    };

    let components = match ty {
        naga::TypeInner::Scalar(_) => 1,
        naga::TypeInner::Vector { size, .. } => *size as u32,
        _ => 0,
    };

    out.push(ShaderInput {
        location: *location,
        components,
    });
}

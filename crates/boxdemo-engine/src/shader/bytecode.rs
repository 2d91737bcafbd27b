use std::fmt;

/// Programmable stage a shader entry point runs in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Pixel => f.write_str("pixel"),
        }
    }
}

/// Compilation target: a stage plus the profile string naming the output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderTarget {
    pub stage: ShaderStage,
    pub profile: &'static str,
}

impl ShaderTarget {
    pub const VERTEX: Self = Self { stage: ShaderStage::Vertex, profile: "vs_spirv" };
    pub const PIXEL: Self = Self { stage: ShaderStage::Pixel, profile: "ps_spirv" };
}

/// One `@location` input of a vertex entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderInput {
    pub location: u32,
    /// Scalar components (1 for `f32`, 3 for `vec3<f32>`, ...).
    pub components: u32,
}

/// Compiled entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderBytecode {
    pub stage: ShaderStage,
    pub entry_point: String,
    /// Name of the source it was compiled from, for diagnostics.
    pub source_name: String,
    /// SPIR-V words.
    pub words: Vec<u32>,
    /// Vertex inputs sorted by location; empty for pixel shaders.
    pub inputs: Vec<ShaderInput>,
}

impl ShaderBytecode {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    pub fn len_bytes(&self) -> usize {
        self.words.len() * 4
    }
}

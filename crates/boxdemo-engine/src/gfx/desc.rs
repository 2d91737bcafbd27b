/// How the CPU may touch a buffer after creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Contents supplied at creation and never changed.
    Immutable,
    /// CPU-writable through write-discard mapping, rewritten every frame.
    Dynamic,
}

/// Pipeline stage a buffer binds to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BindKind {
    Vertex,
    Index,
    /// Shader-visible uniform (constant) buffer.
    Constant,
}

/// Buffer creation parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferDesc<'a> {
    pub label: &'a str,
    /// Size in bytes.
    pub size: u64,
    pub usage: BufferUsage,
    pub bind: BindKind,
}

impl BufferDesc<'_> {
    /// Constant buffers must be sized in whole 16-byte registers.
    pub const CONSTANT_ALIGNMENT: u64 = 16;

    /// Checks the descriptor against the initial data supplied with it.
    ///
    /// Returns a human-readable reason when the combination is invalid.
    pub fn validate(&self, initial: Option<&[u8]>) -> Result<(), String> {
        if self.size == 0 {
            return Err("buffer size is zero".into());
        }

        match self.usage {
            BufferUsage::Immutable => match initial {
                None => return Err("immutable buffer requires initial data".into()),
                Some(data) if data.len() as u64 != self.size => {
                    return Err(format!(
                        "initial data is {} bytes, descriptor declares {}",
                        data.len(),
                        self.size
                    ));
                }
                Some(_) => {}
            },
            BufferUsage::Dynamic => {
                if self.bind != BindKind::Constant {
                    return Err("only constant buffers may be dynamic".into());
                }
            }
        }

        if self.bind == BindKind::Constant && self.size % Self::CONSTANT_ALIGNMENT != 0 {
            return Err(format!(
                "constant buffer size {} is not a multiple of {}",
                self.size,
                Self::CONSTANT_ALIGNMENT
            ));
        }

        Ok(())
    }
}

/// Vertex attribute formats the input layout understands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    pub fn components(self) -> u32 {
        match self {
            VertexFormat::Float32 => 1,
            VertexFormat::Float32x2 => 2,
            VertexFormat::Float32x3 => 3,
            VertexFormat::Float32x4 => 4,
        }
    }

    pub fn size(self) -> u32 {
        self.components() * 4
    }
}

/// Input-assembler stepping rate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputStep {
    PerVertex,
    PerInstance,
}

/// One attribute of the vertex input layout.
///
/// The element's position in the layout slice is the shader `@location` it
/// feeds; `semantic` names it for diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InputElement {
    pub semantic: &'static str,
    pub semantic_index: u32,
    pub format: VertexFormat,
    pub input_slot: u32,
    /// Byte offset inside one vertex.
    pub offset: u32,
    pub step: InputStep,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn size(self) -> u32 {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(size: u64, usage: BufferUsage, bind: BindKind) -> BufferDesc<'static> {
        BufferDesc { label: "test", size, usage, bind }
    }

    #[test]
    fn immutable_needs_matching_data() {
        let d = desc(8, BufferUsage::Immutable, BindKind::Vertex);
        assert!(d.validate(None).is_err());
        assert!(d.validate(Some(&[0u8; 4])).is_err());
        assert!(d.validate(Some(&[0u8; 8])).is_ok());
    }

    #[test]
    fn dynamic_must_be_constant() {
        let d = desc(64, BufferUsage::Dynamic, BindKind::Vertex);
        assert!(d.validate(None).is_err());
        let d = desc(64, BufferUsage::Dynamic, BindKind::Constant);
        assert!(d.validate(None).is_ok());
    }

    #[test]
    fn constant_size_is_register_aligned() {
        let d = desc(60, BufferUsage::Dynamic, BindKind::Constant);
        assert!(d.validate(None).unwrap_err().contains("multiple of 16"));
    }

    #[test]
    fn zero_sized_buffer_rejected() {
        let d = desc(0, BufferUsage::Dynamic, BindKind::Constant);
        assert!(d.validate(None).is_err());
    }

    #[test]
    fn vertex_format_sizes() {
        assert_eq!(VertexFormat::Float32x3.size(), 12);
        assert_eq!(VertexFormat::Float32x4.size(), 16);
        assert_eq!(IndexFormat::U32.size(), 4);
    }
}

use std::borrow::Cow;
use std::path::PathBuf;

use super::CompileError;

/// Where shader source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// WGSL compiled into the binary (`include_str!`).
    Embedded { name: &'static str, wgsl: &'static str },
    /// WGSL file read at compile time.
    File(PathBuf),
}

impl ShaderSource {
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            ShaderSource::Embedded { name, .. } => Cow::Borrowed(name),
            ShaderSource::File(path) => path.to_string_lossy(),
        }
    }

    pub(crate) fn load(&self) -> Result<Cow<'static, str>, CompileError> {
        match self {
            ShaderSource::Embedded { wgsl, .. } => Ok(Cow::Borrowed(*wgsl)),
            ShaderSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| CompileError::Io {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

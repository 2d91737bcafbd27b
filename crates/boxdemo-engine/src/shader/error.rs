use std::path::PathBuf;

use thiserror::Error;

use super::ShaderStage;

/// Shader compilation failure with a rendered diagnostic.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read shader source {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}: parse error\n{diagnostic}")]
    Parse { name: String, diagnostic: String },

    #[error("{name}: validation error\n{diagnostic}")]
    Validation { name: String, diagnostic: String },

    #[error("{name}: no entry point named `{entry_point}`")]
    MissingEntryPoint { name: String, entry_point: String },

    #[error("{name}: entry point `{entry_point}` is not a {expected} shader")]
    WrongStage {
        name: String,
        entry_point: String,
        expected: ShaderStage,
    },

    #[error("{name}: cannot emit `{entry_point}`: {reason}")]
    Emit {
        name: String,
        entry_point: String,
        reason: String,
    },
}

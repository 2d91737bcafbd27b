//! Shader compilation contract.
//!
//! A [`ShaderCompiler`] turns a named source plus an entry point into
//! [`ShaderBytecode`] that a [`GraphicsDevice`](crate::gfx::GraphicsDevice)
//! can create shader objects from. [`WgslCompiler`] is the naga-backed
//! implementation: WGSL in, SPIR-V out.

mod bytecode;
mod error;
mod source;
mod wgsl;

pub use bytecode::{ShaderBytecode, ShaderInput, ShaderStage, ShaderTarget};
pub use error::CompileError;
pub use source::ShaderSource;
pub use wgsl::WgslCompiler;

/// Compiles shader entry points to bytecode.
pub trait ShaderCompiler {
    fn compile(
        &self,
        source: &ShaderSource,
        entry_point: &str,
        target: ShaderTarget,
    ) -> Result<ShaderBytecode, CompileError>;
}

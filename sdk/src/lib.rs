//! tinyobj
//!
//! Front door to the tinyobj schema compiler.
//!
//! - Compiler entry points (re-exported from `tinyobj-compiler`)
//! - `describe_to_json` for inspecting a schema's resolved descriptors

use std::path::Path;

pub use tinyobj_compiler::{
    compile_batch, compile_file, compile_schema, generate_artifacts, load_schema,
    GeneratorConfig, Protoc, SkipWireCompiler, TinyObjError, TypeRegistry, WireCompiler,
};

/// Compile schema text and pretty-print its descriptor tree as JSON.
pub fn describe_to_json(
    text: &str,
    path: &Path,
    registry: &TypeRegistry,
) -> Result<String, TinyObjError> {
    let file = compile_schema(text, path, registry)?;
    serde_json::to_string_pretty(&file).map_err(|e| TinyObjError::Config(e.to_string()))
}

pub mod types {
    pub use tinyobj_compiler::types::{FieldDescriptor, FileDescriptor, StructDescriptor};
}

pub mod error {
    pub use tinyobj_compiler::error::TinyObjError;
}

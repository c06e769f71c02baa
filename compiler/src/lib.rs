//! tinyobj-compiler
//!
//! This crate implements:
//!  1) The scalar type registry (`TypeRegistry`) and composite type resolution,
//!  2) Decoding of XML object schemas into field/struct/file descriptors,
//!  3) Field and struct validation (sizes, duplicate numbers, primary keys),
//!  4) Four generators: C++ value objects, proto2 messages,
//!     serialize/deserialize bodies and ORM registrations,
//!  5) File and batch orchestration, including the `protoc` step,
//!  6) Error types (`TinyObjError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod registry;
pub mod parser;
pub mod verifier;
pub mod artifact;
pub mod config;
pub mod gen_header;
pub mod gen_proto;
pub mod gen_source;
pub mod gen_orm;
pub mod protoc;
pub mod compiler;

pub use compiler::{
    compile_batch, compile_file, compile_schema, emit_file, generate_artifacts, load_schema,
};
pub use config::GeneratorConfig;
pub use error::TinyObjError;
pub use protoc::{Protoc, SkipWireCompiler, WireCompiler};
pub use registry::TypeRegistry;

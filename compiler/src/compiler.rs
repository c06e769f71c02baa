use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{error, info};

use crate::{
    config::GeneratorConfig,
    error::TinyObjError,
    gen_header::{generate_header, header_file_name},
    gen_proto::{generate_proto, proto_file_name},
    gen_source::{generate_source, source_file_name},
    parser::parse_schema,
    protoc::WireCompiler,
    registry::TypeRegistry,
    types::FileDescriptor,
    verifier::verify_file,
};

/// The three rendered artifacts of one schema file.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub header: String,
    pub proto:  String,
    pub source: String,
}

/// Where the artifacts of one schema file were written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFiles {
    pub input:  PathBuf,
    pub header: PathBuf,
    pub proto:  PathBuf,
    pub source: PathBuf,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<GeneratedFiles>,
    /// Files skipped because of a non-fatal error, in input order.
    pub failed:    Vec<(PathBuf, TinyObjError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Parse and validate schema text into its descriptor tree.
pub fn compile_schema(
    text: &str,
    path: &Path,
    registry: &TypeRegistry,
) -> Result<FileDescriptor, TinyObjError> {
    parse_schema(text, path, registry)
}

/// Read a schema file from disk and compile it.
pub fn load_schema(path: &Path, registry: &TypeRegistry) -> Result<FileDescriptor, TinyObjError> {
    let text = fs::read_to_string(path).map_err(|e| TinyObjError::SourceReadFailure {
        path:   path.to_path_buf(),
        reason: e.to_string(),
    })?;
    compile_schema(&text, path, registry)
}

/// Render all three artifacts. Cannot fail on a validated tree.
pub fn generate_artifacts(file: &FileDescriptor, config: &GeneratorConfig) -> Artifacts {
    Artifacts {
        header: generate_header(file, config),
        proto:  generate_proto(file, config),
        source: generate_source(file, config),
    }
}

fn write_artifact(path: &Path, text: &str) -> Result<(), TinyObjError> {
    fs::write(path, text)?;
    info!("{} is generated.", path.display());
    Ok(())
}

/// Write the artifacts of a descriptor tree: header, proto (then the wire
/// compiler on it), and finally the implementation. The tree is verified
/// first, so nothing is written for an invalid one.
pub fn emit_file(
    input: &Path,
    file: &FileDescriptor,
    config: &GeneratorConfig,
    wire: &dyn WireCompiler,
) -> Result<GeneratedFiles, TinyObjError> {
    verify_file(file)?;
    let artifacts = generate_artifacts(file, config);
    let out = &config.output_dir;
    fs::create_dir_all(out)?;

    let generated = GeneratedFiles {
        input:  input.to_path_buf(),
        header: out.join(header_file_name(file)),
        proto:  out.join(proto_file_name(file)),
        source: out.join(source_file_name(file)),
    };

    write_artifact(&generated.header, &artifacts.header)?;
    write_artifact(&generated.proto, &artifacts.proto)?;
    wire.compile(&generated.proto, out)?;
    write_artifact(&generated.source, &artifacts.source)?;

    Ok(generated)
}

/// Compile one schema file end to end. Nothing is written unless the whole
/// file parses and validates.
pub fn compile_file(
    input: &Path,
    config: &GeneratorConfig,
    registry: &TypeRegistry,
    wire: &dyn WireCompiler,
) -> Result<GeneratedFiles, TinyObjError> {
    let file = load_schema(input, registry)?;
    emit_file(input, &file, config, wire)
}

/// Compile every input in order. A failing file is logged and skipped; an
/// external compiler failure stops the batch and is returned as `Err`.
pub fn compile_batch(
    inputs: &[PathBuf],
    config: &GeneratorConfig,
    wire: &dyn WireCompiler,
) -> Result<BatchReport, TinyObjError> {
    let registry = config.registry();
    let mut report = BatchReport::default();

    for input in inputs {
        match compile_file(input, config, &registry, wire) {
            Ok(generated) => report.generated.push(generated),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("{} parse failed: {}", input.display(), e);
                report.failed.push((input.clone(), e));
            }
        }
    }

    Ok(report)
}

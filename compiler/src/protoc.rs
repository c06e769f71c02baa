use std::{
    path::{Path, PathBuf},
    process::Command,
};

use tracing::info;

use crate::error::TinyObjError;

/// Turns a generated `.proto` file into binary-format bindings.
pub trait WireCompiler {
    fn compile(&self, proto: &Path, output_dir: &Path) -> Result<(), TinyObjError>;
}

/// Runs `protoc -I=<out> --cpp_out=<out> <proto>` and waits for it.
#[derive(Debug, Clone)]
pub struct Protoc {
    program: PathBuf,
}

impl Protoc {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Protoc { program: program.into() }
    }

    pub fn command(&self, proto: &Path, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(format!("-I={}", output_dir.display()))
            .arg(format!("--cpp_out={}", output_dir.display()))
            .arg(proto);
        cmd
    }
}

impl WireCompiler for Protoc {
    fn compile(&self, proto: &Path, output_dir: &Path) -> Result<(), TinyObjError> {
        let output = self.command(proto, output_dir).output().map_err(|e| {
            TinyObjError::ExternalCompilerFailure {
                path:   proto.to_path_buf(),
                status: None,
                output: format!("failed to run {}: {}", self.program.display(), e),
            }
        })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(TinyObjError::ExternalCompilerFailure {
                path:   proto.to_path_buf(),
                status: output.status.code(),
                output: combined.trim_end().to_string(),
            });
        }

        let stem = proto.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        info!("{} -> {}.pb.h & {}.pb.cc", proto.display(), stem, stem);
        Ok(())
    }
}

/// Leaves the `.proto` file alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipWireCompiler;

impl WireCompiler for SkipWireCompiler {
    fn compile(&self, proto: &Path, _output_dir: &Path) -> Result<(), TinyObjError> {
        info!("{}: skipping protoc", proto.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line() {
        let protoc = Protoc::new("/usr/local/bin/protoc");
        let cmd = protoc.command(Path::new("gen/player.proto"), Path::new("gen"));
        assert_eq!(cmd.get_program(), "/usr/local/bin/protoc");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-I=gen", "--cpp_out=gen", "gen/player.proto"]);
    }

    #[test]
    fn missing_program_is_a_compiler_failure() {
        let protoc = Protoc::new("tinyobj-no-such-protoc");
        let err = protoc.compile(Path::new("player.proto"), Path::new(".")).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, TinyObjError::ExternalCompilerFailure { status: None, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_output() {
        // `false` ignores its arguments and exits with status 1
        let protoc = Protoc::new("false");
        let err = protoc.compile(Path::new("player.proto"), Path::new(".")).unwrap_err();
        assert!(matches!(err, TinyObjError::ExternalCompilerFailure { status: Some(1), .. }));
    }

    #[test]
    fn skip_always_succeeds() {
        assert!(SkipWireCompiler.compile(Path::new("player.proto"), Path::new(".")).is_ok());
    }
}

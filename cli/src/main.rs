use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tinyobj::describe_to_json;
use tinyobj_compiler::error::TinyObjError;
use tinyobj_compiler::{compile_batch, GeneratorConfig, Protoc, SkipWireCompiler, WireCompiler};
use tracing::error;

#[derive(Parser)]
#[command(name = "tinyobj")]
#[command(
    about = "Generate C++ value objects, protobuf messages and ORM glue from XML schemas",
    long_about = None
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory the generated files are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON generator config; flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// protoc executable
    #[arg(long)]
    protoc: Option<PathBuf>,

    /// Write the .proto files without running protoc on them
    #[arg(long)]
    skip_protoc: bool,

    /// Print each schema's descriptor tree as JSON instead of generating
    #[arg(long)]
    dump: bool,

    /// Input schema files (`obj1.xml obj2.xml ...`)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, TinyObjError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(protoc) = &cli.protoc {
        config.protoc = protoc.clone();
    }
    Ok(config)
}

fn dump(cli: &Cli, config: &GeneratorConfig) -> Result<bool, TinyObjError> {
    let registry = config.registry();
    let mut ok = true;
    for input in &cli.inputs {
        let text = fs::read_to_string(input).map_err(|e| TinyObjError::SourceReadFailure {
            path:   input.clone(),
            reason: e.to_string(),
        });
        match text.and_then(|text| describe_to_json(&text, input, &registry)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("{}: {}", input.display(), e);
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn run(cli: &Cli) -> Result<bool, TinyObjError> {
    let config = load_config(cli)?;
    if cli.dump {
        return dump(cli, &config);
    }

    let protoc = Protoc::new(config.protoc.clone());
    let wire: &dyn WireCompiler = if cli.skip_protoc { &SkipWireCompiler } else { &protoc };

    let report = compile_batch(&cli.inputs, &config, wire)?;
    Ok(report.is_success())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

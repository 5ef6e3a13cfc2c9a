//! Binary to generate PHP DTOs from an API description.
//!
//! Usage:
//!
//! - `api-dto-gen generate --schema api-doc.json` clears the output directory
//!   and regenerates every DTO.
//! - `api-dto-gen clear` removes the output directory.

use std::path::{Path, PathBuf};
use std::process;

use api_dto_gen::{
    DtoGenError, GenerateSettings, Generator, generate_from_file, load_schema, resolve_output_dir,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "api-dto-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    output: OutputArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove the output directory and regenerate every DTO
    Generate {
        /// JSON schema document describing the API
        #[arg(short, long)]
        schema: PathBuf,
    },
    /// Remove the output directory
    Clear {
        /// Schema document whose `settings` entry picks the output directory
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory that relative output paths are resolved against
    /// (defaults to the current directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Output directory, relative to the base directory
    #[arg(short, long, global = true, default_value = api_dto_gen::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Root namespace of the generated classes
    #[arg(short, long, global = true, default_value = api_dto_gen::DEFAULT_NAMESPACE)]
    namespace: String,
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_for(output: &OutputArgs, base_dir: &Path) -> Result<GenerateSettings, DtoGenError> {
    let output_dir: PathBuf = resolve_output_dir(base_dir, &output.output).ok_or_else(|| {
        DtoGenError::UnsafeOutputDir {
            path: base_dir.join(&output.output),
        }
    })?;
    Ok(GenerateSettings {
        output_dir,
        namespace: output.namespace.clone(),
        ..GenerateSettings::default()
    })
}

fn run(cli: Cli) -> Result<(), DtoGenError> {
    let base_dir: PathBuf = match cli.output.base_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let settings: GenerateSettings = settings_for(&cli.output, &base_dir)?;

    match cli.command {
        Command::Generate { schema } => {
            let written: Vec<PathBuf> = generate_from_file(&schema, settings, &base_dir)?;
            println!("Generated {} files", written.len());
        }
        Command::Clear { schema } => {
            let settings: GenerateSettings = match schema {
                Some(path) => match load_schema(path)?.settings {
                    Some(doc_settings) => settings.with_doc_settings(&doc_settings, &base_dir)?,
                    None => settings,
                },
                None => settings,
            };
            Generator::new(settings).clear()?;
        }
    }
    Ok(())
}

fn main() {
    let cli: Cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

//! Binary entry point for the bootscript CLI.

use std::io::{self, Write};
use std::process;

use camino::Utf8Path;
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bootscript::{
    AssembleOptions, ManifestError, ParseTargetFamilyError, RenderConfig, RenderedScript,
    TargetFamily, assemble_with, load_manifest,
};

mod cli;

use cli::{Cli, RenderCommand};

/// Environment variable holding the `tracing` filter directives.
const LOG_ENV_VAR: &str = "BOOTSCRIPT_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("target error: {0}")]
    Target(#[from] ParseTargetFamilyError),
    #[error("failed to write script: {0}")]
    Output(String),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli {
        Cli::Render(command) => {
            let config = RenderConfig::load_without_cli_args()
                .map_err(|err| CliError::Config(err.to_string()))?;
            let script = render(&command, &config)?;
            write_script(io::stdout().lock(), &script)
        }
    }
}

fn render(args: &RenderCommand, config: &RenderConfig) -> Result<RenderedScript, CliError> {
    config
        .validate()
        .map_err(|err| CliError::Config(err.to_string()))?;
    let manifest = load_manifest(Utf8Path::new(&args.manifest), &config.manifest_defaults())?;
    let family = select_family(args.target.as_deref(), manifest.target, config)?;
    let options = AssembleOptions {
        framed: config.assemble_options().framed && !args.bare,
    };
    debug!(%family, framed = options.framed, manifest = %args.manifest, "rendering manifest");
    Ok(assemble_with(&manifest.statements, family, options))
}

/// Picks the target family: CLI flag, then manifest, then configuration.
fn select_family(
    flag: Option<&str>,
    manifest: Option<TargetFamily>,
    config: &RenderConfig,
) -> Result<TargetFamily, CliError> {
    if let Some(raw) = flag {
        return Ok(raw.parse::<TargetFamily>()?);
    }
    if let Some(family) = manifest {
        return Ok(family);
    }
    config
        .target_family()
        .map_err(|err| CliError::Config(err.to_string()))
}

fn write_script(mut target: impl Write, script: &RenderedScript) -> Result<(), CliError> {
    target
        .write_all(script.as_str().as_bytes())
        .and_then(|()| target.flush())
        .map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

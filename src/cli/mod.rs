//! Command-line interface definitions for the `bootscript` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `bootscript` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bootscript",
    about = "Render bootstrap scripts for POSIX shells and Windows cmd",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Render a statement manifest to standard output.
    #[command(name = "render", about = "Render a statement manifest to standard output")]
    Render(RenderCommand),
}

/// Arguments for the `bootscript render` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct RenderCommand {
    /// Path to the JSON statement manifest.
    #[arg(long, value_name = "PATH")]
    pub(crate) manifest: String,
    /// Target family (`posix` or `windows`).
    ///
    /// Overrides the manifest's `target` and the configured default.
    #[arg(long, value_name = "FAMILY")]
    pub(crate) target: Option<String>,
    /// Omit the prologue, error guards, and epilogue.
    #[arg(long)]
    pub(crate) bare: bool,
}

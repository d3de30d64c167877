//! Renders the `bootscript.1` man page into `OUT_DIR` from the clap
//! definitions shared with the binary.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

const MAN_PAGE: &str = "bootscript.1";

fn main() -> Result<(), Box<dyn Error>> {
    let mut cargo = io::stdout().lock();
    for watched in ["build.rs", "src/cli/mod.rs"] {
        writeln!(cargo, "cargo:rerun-if-changed={watched}")?;
    }

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR was not set"))?;

    let command = cli::Cli::command().version(env!("CARGO_PKG_VERSION"));
    let mut page = BufWriter::new(File::create(out_dir.join(MAN_PAGE))?);
    Man::new(command).render(&mut page)?;
    page.flush()?;
    Ok(())
}

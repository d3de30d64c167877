//! Core library for rendering bootstrap scripts.
//!
//! Callers describe what a freshly provisioned machine should do as an
//! ordered list of [`Statement`] values (write a file, append to a file,
//! export a variable, call a function, run a portable command line). The
//! crate renders that list into one deterministic script for either a POSIX
//! shell or the Windows command interpreter. Delivering and executing the
//! script is left to the caller's transport.
//!
//! ```
//! use bootscript::{Statement, TargetFamily, assemble};
//!
//! let statement = Statement::file()
//!     .path("/tmp/out.txt")
//!     .lines(["a", "b"])
//!     .delimiter("END")
//!     .build_create_or_overwrite()?;
//! assert_eq!(
//!     statement.render(TargetFamily::Posix),
//!     "cat > /tmp/out.txt <<-'END'\na\nb\nEND\n"
//! );
//!
//! let script = assemble(&[statement], TargetFamily::Posix);
//! assert!(script.as_str().starts_with("#!/bin/sh\n"));
//! # Ok::<(), bootscript::StatementError>(())
//! ```

pub mod config;
pub mod escape;
pub mod manifest;
pub mod script;
pub mod statement;
pub mod target;

pub use config::{ConfigError, RenderConfig};
pub use manifest::{
    DEFAULT_DELIMITER, Manifest, ManifestDefaults, ManifestError, load_manifest, parse_manifest,
};
pub use script::{AssembleOptions, RenderedScript, Script, assemble, assemble_with};
pub use statement::{
    FileStatementBuilder, FileWrite, FileWriteConfig, Statement, StatementError, WriteMode,
    new_append_file, new_create_or_overwrite_file,
};
pub use target::{ParseTargetFamilyError, TargetFamily};

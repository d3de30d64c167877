//! Declarative statement manifests.
//!
//! A manifest is a JSON document listing statements in execution order:
//!
//! ```json
//! {
//!   "target": "posix",
//!   "statements": [
//!     { "kind": "create_or_overwrite_file", "path": "/tmp/out.txt", "lines": ["a", "b"] },
//!     { "kind": "export_variable", "name": "APP_HOME", "value": "/opt/app" }
//!   ]
//! }
//! ```
//!
//! Every entry goes through the same validating constructors as
//! programmatic construction, so a loaded manifest is always renderable.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::statement::{
    FileStatementBuilder, Statement, StatementError, new_append_file,
    new_create_or_overwrite_file,
};
use crate::target::TargetFamily;

/// Delimiter used when neither the manifest nor the configuration sets one.
pub const DEFAULT_DELIMITER: &str = "END";

/// Errors raised while loading a manifest.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ManifestError {
    /// Raised when the manifest file cannot be read.
    #[error("failed to read manifest `{path}`: {message}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying error message.
        message: String,
    },
    /// Raised when the manifest is not valid JSON or has an unknown shape.
    #[error("failed to parse manifest: {0}")]
    Parse(String),
    /// Raised when an entry fails statement validation.
    #[error("statement {index} is invalid: {source}")]
    Statement {
        /// Zero-based position of the entry in `statements`.
        index: usize,
        /// Validation failure.
        #[source]
        source: StatementError,
    },
}

/// Values applied to entries that leave optional fields out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManifestDefaults {
    /// Heredoc delimiter for file statements without one.
    pub delimiter: String,
}

impl Default for ManifestDefaults {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_owned(),
        }
    }
}

/// Validated manifest content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Manifest {
    /// Family requested by the manifest, if any.
    pub target: Option<TargetFamily>,
    /// Statements in execution order.
    pub statements: Vec<Statement>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDocument {
    #[serde(default)]
    target: Option<TargetFamily>,
    statements: Vec<StatementEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StatementEntry {
    AppendFile(FileEntry),
    CreateOrOverwriteFile(FileEntry),
    Literal {
        text: String,
    },
    ExportVariable {
        name: String,
        value: String,
    },
    CallFunction {
        name: String,
        #[serde(default)]
        args: Vec<String>,
    },
    Interpret {
        template: String,
    },
    Comment {
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    path: String,
    #[serde(default)]
    lines: Vec<String>,
    delimiter: Option<String>,
    #[serde(default)]
    expand_variables: bool,
}

impl FileEntry {
    fn into_builder(self, defaults: &ManifestDefaults) -> FileStatementBuilder {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| defaults.delimiter.clone());
        Statement::file()
            .path(self.path)
            .lines(self.lines)
            .delimiter(delimiter)
            .expand_variables(self.expand_variables)
    }
}

impl StatementEntry {
    fn into_statement(self, defaults: &ManifestDefaults) -> Result<Statement, StatementError> {
        match self {
            Self::AppendFile(entry) => new_append_file(entry.into_builder(defaults).into_config()),
            Self::CreateOrOverwriteFile(entry) => {
                new_create_or_overwrite_file(entry.into_builder(defaults).into_config())
            }
            Self::Literal { text } => Statement::literal(text),
            Self::ExportVariable { name, value } => Statement::export_variable(name, value),
            Self::CallFunction { name, args } => Statement::call_function(name, args),
            Self::Interpret { template } => Statement::interpret(template),
            Self::Comment { text } => Statement::comment(text),
        }
    }
}

/// Parses and validates a JSON manifest.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`] for malformed JSON and
/// [`ManifestError::Statement`] for the first entry that fails validation.
pub fn parse_manifest(json: &str, defaults: &ManifestDefaults) -> Result<Manifest, ManifestError> {
    let document: ManifestDocument =
        serde_json::from_str(json).map_err(|err| ManifestError::Parse(err.to_string()))?;

    let statements = document
        .statements
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_statement(defaults)
                .map_err(|source| ManifestError::Statement { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        statements = statements.len(),
        target = ?document.target,
        "parsed manifest"
    );
    Ok(Manifest {
        target: document.target,
        statements,
    })
}

/// Reads, parses, and validates the manifest at `path`.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] when the file cannot be read, otherwise
/// the errors of [`parse_manifest`].
pub fn load_manifest(path: &Utf8Path, defaults: &ManifestDefaults) -> Result<Manifest, ManifestError> {
    let content = read_to_string_ambient(path).map_err(|message| ManifestError::Read {
        path: path.to_string(),
        message,
    })?;
    parse_manifest(&content, defaults)
}

/// Opens the manifest's parent directory with ambient authority and reads
/// the file from it. Relative paths keep their parent, so `../m.json` works.
fn read_to_string_ambient(path: &Utf8Path) -> Result<String, String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("path has no file name: {path}"))?;
    let dir_path = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir =
        Dir::open_ambient_dir(dir_path, ambient_authority()).map_err(|err| err.to_string())?;
    dir.read_to_string(file_name).map_err(|err| err.to_string())
}

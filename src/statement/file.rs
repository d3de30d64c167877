//! File-content statements: append to a file or create/overwrite it.
//!
//! Both statements share one builder ([`FileStatementBuilder`]), one
//! configuration record ([`FileWriteConfig`]), and one validation routine.
//! They differ only in [`WriteMode`], which selects the redirect operator on
//! POSIX and the console-copy opener on Windows.
//!
//! POSIX output is a heredoc:
//!
//! ```text
//! cat > /tmp/out.txt <<-'END'
//! a
//! b
//! END
//! ```
//!
//! Windows has no heredoc, so the body is fed to `copy` from the console
//! device and closed with the Ctrl-Z end-of-input marker.

use crate::escape::{ensure_present, ensure_single_line, quote_path};
use crate::target::TargetFamily;

use super::{Statement, StatementError};

/// End-of-input marker that closes a Windows console-copy block (Ctrl-Z).
pub const CONSOLE_EOF: char = '\u{1a}';

/// Printable name for [`CONSOLE_EOF`] used in error messages.
const CONSOLE_EOF_NAME: &str = "^Z";

/// Whether a file statement keeps or discards existing content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    /// Keep existing content and append the body.
    Append,
    /// Discard existing content before writing the body.
    Truncate,
}

impl WriteMode {
    /// POSIX redirect operator for this mode.
    #[must_use]
    pub const fn redirect_operator(self) -> &'static str {
        match self {
            Self::Append => ">>",
            Self::Truncate => ">",
        }
    }
}

/// Unvalidated field values collected by [`FileStatementBuilder`].
///
/// Pass the record to [`new_append_file`] or [`new_create_or_overwrite_file`]
/// to obtain a validated [`Statement`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileWriteConfig {
    /// Destination path on the remote host.
    pub path: String,
    /// Body lines, written in order.
    pub lines: Vec<String>,
    /// Heredoc terminator token.
    pub delimiter: String,
    /// Whether the POSIX shell expands variables inside the body.
    pub expand_variables: bool,
}

/// Validated content of an append or create/overwrite statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileWrite {
    path: String,
    lines: Vec<String>,
    delimiter: String,
    expand_variables: bool,
}

impl FileWrite {
    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Body lines in write order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Heredoc terminator token.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whether the POSIX shell expands variables inside the body.
    #[must_use]
    pub const fn expand_variables(&self) -> bool {
        self.expand_variables
    }
}

/// Chainable builder shared by append and create/overwrite statements.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileStatementBuilder {
    config: FileWriteConfig,
}

impl FileStatementBuilder {
    /// Creates an empty builder; `path` and `delimiter` must be set before
    /// building.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination path.
    #[must_use]
    pub fn path(mut self, value: impl Into<String>) -> Self {
        self.config.path = value.into();
        self
    }

    /// Replaces the body lines.
    #[must_use]
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the heredoc terminator token.
    #[must_use]
    pub fn delimiter(mut self, value: impl Into<String>) -> Self {
        self.config.delimiter = value.into();
        self
    }

    /// Enables or disables variable expansion inside the body.
    #[must_use]
    pub const fn expand_variables(mut self, value: bool) -> Self {
        self.config.expand_variables = value;
        self
    }

    /// Returns the collected configuration without validating it.
    #[must_use]
    pub fn into_config(self) -> FileWriteConfig {
        self.config
    }

    /// Builds an append statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when the configuration is invalid.
    pub fn build_append(self) -> Result<Statement, StatementError> {
        new_append_file(self.config)
    }

    /// Builds a create/overwrite statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when the configuration is invalid.
    pub fn build_create_or_overwrite(self) -> Result<Statement, StatementError> {
        new_create_or_overwrite_file(self.config)
    }
}

/// Validates `config` and returns a statement that appends to the file.
///
/// # Errors
///
/// Returns [`StatementError`] when the configuration is invalid.
pub fn new_append_file(config: FileWriteConfig) -> Result<Statement, StatementError> {
    validate(config).map(Statement::AppendFile)
}

/// Validates `config` and returns a statement that creates or truncates the
/// file before writing.
///
/// # Errors
///
/// Returns [`StatementError`] when the configuration is invalid.
pub fn new_create_or_overwrite_file(config: FileWriteConfig) -> Result<Statement, StatementError> {
    validate(config).map(Statement::CreateOrOverwriteFile)
}

/// Checks that `delimiter` can be used as an unquoted heredoc terminator.
///
/// # Errors
///
/// Returns [`StatementError::Invalid`] when the delimiter is empty or
/// contains anything other than ASCII letters, digits, and `_`.
pub fn validate_delimiter(delimiter: &str) -> Result<(), StatementError> {
    ensure_present("delimiter", delimiter)?;
    if !delimiter
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return Err(StatementError::invalid(
            "delimiter",
            format!("`{delimiter}` may only contain ASCII letters, digits, and `_`"),
        ));
    }
    Ok(())
}

fn validate(config: FileWriteConfig) -> Result<FileWrite, StatementError> {
    let FileWriteConfig {
        path,
        lines,
        delimiter,
        expand_variables,
    } = config;

    ensure_present("path", &path)?;
    ensure_single_line("path", &path)?;
    validate_delimiter(&delimiter)?;

    for (index, line) in lines.iter().enumerate() {
        let number = index + 1;
        ensure_single_line("lines", line)?;
        if *line == delimiter {
            return Err(StatementError::DelimiterCollision {
                delimiter,
                line: number,
            });
        }
        if line.contains(CONSOLE_EOF) {
            return Err(StatementError::DelimiterCollision {
                delimiter: CONSOLE_EOF_NAME.to_owned(),
                line: number,
            });
        }
        // `<<-` strips leading tabs, so such a line would not survive.
        if line.starts_with('\t') {
            return Err(StatementError::invalid(
                "lines",
                format!("line {number} starts with a tab, which a `<<-` heredoc strips"),
            ));
        }
    }

    Ok(FileWrite {
        path,
        lines,
        delimiter,
        expand_variables,
    })
}

/// Renders a file statement for `family`.
#[must_use]
pub fn render_file(file: &FileWrite, mode: WriteMode, family: TargetFamily) -> String {
    match family {
        TargetFamily::Posix => render_heredoc(file, mode),
        TargetFamily::Windows => render_console_copy(file, mode),
    }
}

fn render_heredoc(file: &FileWrite, mode: WriteMode) -> String {
    let family = TargetFamily::Posix;
    let terminator = family.line_terminator();
    let path = quote_path(&file.path, family);
    let quote = if file.expand_variables { "" } else { "'" };

    let mut rendered = format!(
        "cat {op} {path} <<-{quote}{delimiter}{quote}{terminator}",
        op = mode.redirect_operator(),
        delimiter = file.delimiter,
    );
    for line in &file.lines {
        rendered.push_str(line);
        rendered.push_str(terminator);
    }
    rendered.push_str(&file.delimiter);
    rendered.push_str(terminator);
    rendered
}

fn render_console_copy(file: &FileWrite, mode: WriteMode) -> String {
    let family = TargetFamily::Windows;
    let terminator = family.line_terminator();
    let path = quote_path(&file.path, family);

    let mut rendered = String::new();
    match mode {
        WriteMode::Truncate => {
            push_line(&mut rendered, &format!("copy /y CON {path}"), terminator);
        }
        WriteMode::Append => {
            push_line(
                &mut rendered,
                &format!("if not exist {path} type NUL > {path}"),
                terminator,
            );
            push_line(
                &mut rendered,
                &format!("copy /b /y {path}+CON {path}"),
                terminator,
            );
        }
    }
    rendered.push_str(&console_body(&file.lines, terminator));
    rendered
}

/// Body of a console-copy block: each line verbatim, then the end-of-input
/// marker on its own line.
fn console_body(lines: &[String], terminator: &str) -> String {
    let mut body = String::new();
    for line in lines {
        push_line(&mut body, line, terminator);
    }
    body.push(CONSOLE_EOF);
    body.push_str(terminator);
    body
}

fn push_line(buffer: &mut String, line: &str, terminator: &str) {
    buffer.push_str(line);
    buffer.push_str(terminator);
}

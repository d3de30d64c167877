//! Declarative script statements.
//!
//! A [`Statement`] is an immutable unit of bootstrap behaviour. Every variant
//! is validated when it is constructed, so [`Statement::render`] is a pure,
//! infallible function of the statement and the [`TargetFamily`]. Rendered
//! text always ends with the family line terminator.

use crate::target::TargetFamily;

mod command;
mod error;
mod file;
mod variable;

pub use command::{CallFunction, Comment, Interpret, Literal};
pub use error::StatementError;
pub use file::{
    CONSOLE_EOF, FileStatementBuilder, FileWrite, FileWriteConfig, WriteMode,
    new_append_file, new_create_or_overwrite_file, render_file, validate_delimiter,
};
pub use variable::ExportVariable;

/// One unit of script content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    /// Raw text emitted verbatim.
    Literal(Literal),
    /// Appends lines to a file, keeping existing content.
    AppendFile(FileWrite),
    /// Writes lines to a file, discarding existing content.
    CreateOrOverwriteFile(FileWrite),
    /// Exports a variable with a literal value.
    ExportVariable(ExportVariable),
    /// Calls a script function.
    CallFunction(CallFunction),
    /// Portable template with family specific tokens and variables.
    Interpret(Interpret),
    /// Comment line.
    Comment(Comment),
}

impl Statement {
    /// Starts a builder for an append or create/overwrite statement.
    #[must_use]
    pub fn file() -> FileStatementBuilder {
        FileStatementBuilder::new()
    }

    /// Creates a [`Statement::Literal`].
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when `text` is blank.
    pub fn literal(text: impl Into<String>) -> Result<Self, StatementError> {
        Literal::new(text).map(Self::Literal)
    }

    /// Creates a [`Statement::ExportVariable`].
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when the name or value is invalid.
    pub fn export_variable(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, StatementError> {
        ExportVariable::new(name, value).map(Self::ExportVariable)
    }

    /// Creates a [`Statement::CallFunction`].
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when the name or an argument is invalid.
    pub fn call_function<I, S>(name: impl Into<String>, args: I) -> Result<Self, StatementError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CallFunction::new(name, args).map(Self::CallFunction)
    }

    /// Creates a [`Statement::Interpret`].
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when `template` is blank.
    pub fn interpret(template: impl Into<String>) -> Result<Self, StatementError> {
        Interpret::new(template).map(Self::Interpret)
    }

    /// Creates a [`Statement::Comment`].
    ///
    /// # Errors
    ///
    /// Returns [`StatementError`] when `text` spans multiple lines.
    pub fn comment(text: impl Into<String>) -> Result<Self, StatementError> {
        Comment::new(text).map(Self::Comment)
    }

    /// Renders the statement for `family`.
    #[must_use]
    pub fn render(&self, family: TargetFamily) -> String {
        match self {
            Self::Literal(literal) => literal.render(family),
            Self::AppendFile(file) => render_file(file, WriteMode::Append, family),
            Self::CreateOrOverwriteFile(file) => render_file(file, WriteMode::Truncate, family),
            Self::ExportVariable(export) => export.render(family),
            Self::CallFunction(call) => call.render(family),
            Self::Interpret(interpret) => interpret.render(family),
            Self::Comment(comment) => comment.render(family),
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::AppendFile(_) => "append_file",
            Self::CreateOrOverwriteFile(_) => "create_or_overwrite_file",
            Self::ExportVariable(_) => "export_variable",
            Self::CallFunction(_) => "call_function",
            Self::Interpret(_) => "interpret",
            Self::Comment(_) => "comment",
        }
    }

    /// Returns `false` for statements that cannot change the exit status.
    #[must_use]
    pub const fn can_fail(&self) -> bool {
        !matches!(self, Self::Comment(_))
    }
}

#[cfg(test)]
mod tests;

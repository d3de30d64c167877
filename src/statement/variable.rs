//! Environment variable export.

use crate::escape::{
    batch_literal, caret_escape, ensure_identifier, ensure_single_line, quote_argument,
};
use crate::target::TargetFamily;

use super::StatementError;

/// Exports a variable with a literal value.
///
/// The value is never expanded. POSIX output quotes it with
/// `shell-escape`. Windows output doubles `%` inside a quoted `set`, and
/// falls back to a caret-escaped unquoted `set` when the value itself holds
/// a `"`. Use an [`Interpret`](super::Interpret) statement when expansion is
/// wanted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportVariable {
    name: String,
    value: String,
}

impl ExportVariable {
    /// Creates an export statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Invalid`] when `name` is not an identifier
    /// or `value` spans multiple lines.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, StatementError> {
        let variable = name.into();
        let literal = value.into();
        ensure_identifier("name", &variable)?;
        ensure_single_line("value", &literal)?;
        Ok(Self {
            name: variable,
            value: literal,
        })
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn render(&self, family: TargetFamily) -> String {
        let terminator = family.line_terminator();
        match family {
            TargetFamily::Posix => format!(
                "export {}={}{terminator}",
                self.name,
                quote_argument(&self.value, family)
            ),
            TargetFamily::Windows if self.value.contains('"') => format!(
                "set {}={}{terminator}",
                self.name,
                caret_escape(&self.value)
            ),
            TargetFamily::Windows => format!(
                "set \"{}={}\"{terminator}",
                self.name,
                batch_literal(&self.value)
            ),
        }
    }
}

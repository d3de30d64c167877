//! Command-line statements: literal text, portable templates, function
//! calls, and comments.

use crate::escape::{
    batch_literal, convert_variable_references, ensure_identifier, ensure_present,
    ensure_single_line, quote_argument, replace_tokens, terminate_lines,
};
use crate::target::TargetFamily;

use super::StatementError;

/// Raw script text emitted verbatim.
///
/// Embedded line breaks are normalised to the target line terminator; no
/// other transformation is applied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Literal {
    text: String,
}

impl Literal {
    /// Creates a literal statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Invalid`] when `text` is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, StatementError> {
        let owned = text.into();
        ensure_present("text", &owned)?;
        Ok(Self { text: owned })
    }

    /// Text as supplied by the caller.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn render(&self, family: TargetFamily) -> String {
        terminate_lines(&self.text, family)
    }
}

/// Portable template resolved per target family.
///
/// `$NAME` and `${NAME}` become `%NAME%` on Windows, and `{token}`
/// placeholders such as `{lf}`, `{fs}`, or `{varl}NAME{varr}` resolve to the
/// family conventions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interpret {
    template: String,
}

impl Interpret {
    /// Creates an interpreted statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Invalid`] when `template` is blank.
    pub fn new(template: impl Into<String>) -> Result<Self, StatementError> {
        let owned = template.into();
        ensure_present("template", &owned)?;
        Ok(Self { template: owned })
    }

    /// Unresolved template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn render(&self, family: TargetFamily) -> String {
        let converted = convert_variable_references(&self.template, family);
        terminate_lines(&replace_tokens(&converted, family), family)
    }
}

/// Invocation of a script function with quoted arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallFunction {
    name: String,
    args: Vec<String>,
}

impl CallFunction {
    /// Creates a function call statement.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Invalid`] when `name` is not an identifier
    /// or an argument spans multiple lines.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Result<Self, StatementError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let function = name.into();
        ensure_identifier("name", &function)?;
        let arguments: Vec<String> = args.into_iter().map(Into::into).collect();
        for arg in &arguments {
            ensure_single_line("args", arg)?;
        }
        Ok(Self {
            name: function,
            args: arguments,
        })
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in call order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn render(&self, family: TargetFamily) -> String {
        let mut rendered = match family {
            TargetFamily::Posix => self.name.clone(),
            TargetFamily::Windows => format!("call :{}", self.name),
        };
        for arg in &self.args {
            rendered.push(' ');
            let quoted = match family {
                TargetFamily::Posix => quote_argument(arg, family),
                // `call` expands `%` a second time.
                TargetFamily::Windows => quote_argument(&batch_literal(arg), family),
            };
            rendered.push_str(&quoted);
        }
        rendered.push_str(family.line_terminator());
        rendered
    }
}

/// Single comment line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Creates a comment statement. Empty comments are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Invalid`] when `text` spans multiple lines.
    pub fn new(text: impl Into<String>) -> Result<Self, StatementError> {
        let owned = text.into();
        ensure_single_line("text", &owned)?;
        Ok(Self { text: owned })
    }

    /// Comment text without the comment token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn render(&self, family: TargetFamily) -> String {
        let token = family.comment_token();
        let terminator = family.line_terminator();
        if self.text.is_empty() {
            return format!("{token}{terminator}");
        }
        format!("{token} {}{terminator}", self.text)
    }
}

//! Script assembly: ordered statements in, one script body out.
//!
//! Statements render in the order the caller supplied them, since later
//! statements may depend on files or variables established earlier. A framed
//! script adds the family prologue and epilogue and stops at the first
//! failing statement: POSIX scripts run under `set -e`, Windows scripts get
//! an error-level guard after every statement that can fail.

use std::fmt;

use tracing::{debug, trace};

use crate::statement::Statement;
use crate::target::TargetFamily;

/// Controls how [`assemble_with`] wraps the rendered statements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AssembleOptions {
    /// Emit the prologue, per-statement error guards, and epilogue. Disable
    /// to produce a fragment for embedding in a larger script.
    pub framed: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { framed: true }
    }
}

/// Text of a rendered script.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedScript {
    family: TargetFamily,
    text: String,
}

impl RenderedScript {
    /// Family the script was rendered for.
    #[must_use]
    pub const fn family(&self) -> TargetFamily {
        self.family
    }

    /// Borrowed script text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the script, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for RenderedScript {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RenderedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Assembles a framed script from `statements`.
#[must_use]
pub fn assemble(statements: &[Statement], family: TargetFamily) -> RenderedScript {
    assemble_with(statements, family, AssembleOptions::default())
}

/// Assembles `statements` using explicit [`AssembleOptions`].
#[must_use]
pub fn assemble_with(
    statements: &[Statement],
    family: TargetFamily,
    options: AssembleOptions,
) -> RenderedScript {
    let terminator = family.line_terminator();
    let guard = family.error_guard().filter(|_| options.framed);
    let mut text = String::new();

    if options.framed {
        for line in family.prologue() {
            text.push_str(line);
            text.push_str(terminator);
        }
    }

    for (index, statement) in statements.iter().enumerate() {
        trace!(index, kind = statement.kind(), %family, "rendering statement");
        text.push_str(&statement.render(family));
        if let Some(check) = guard
            && statement.can_fail()
        {
            text.push_str(check);
            text.push_str(terminator);
        }
    }

    if options.framed {
        text.push_str(family.epilogue());
        text.push_str(terminator);
    }

    debug!(
        %family,
        statements = statements.len(),
        bytes = text.len(),
        framed = options.framed,
        "assembled script"
    );
    RenderedScript { family, text }
}

/// Ordered, owned list of statements.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Appends a statement.
    pub fn push(&mut self, statement: Statement) -> &mut Self {
        self.statements.push(statement);
        self
    }

    /// Statements in execution order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` when the script has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Renders a framed script for `family`.
    #[must_use]
    pub fn render(&self, family: TargetFamily) -> RenderedScript {
        assemble(&self.statements, family)
    }

    /// Renders the script with explicit options.
    #[must_use]
    pub fn render_with(&self, family: TargetFamily, options: AssembleOptions) -> RenderedScript {
        assemble_with(&self.statements, family, options)
    }
}

impl From<Vec<Statement>> for Script {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl FromIterator<Statement> for Script {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Statement> for Script {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        self.statements.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn statements() -> Vec<Statement> {
        vec![
            Statement::comment("write config").expect("comment"),
            Statement::file()
                .path("/etc/app.conf")
                .lines(["port=8080"])
                .delimiter("END")
                .build_create_or_overwrite()
                .expect("create file"),
            Statement::export_variable("APP_CONF", "/etc/app.conf").expect("export"),
        ]
    }

    #[rstest]
    fn posix_script_is_framed_with_set_e(statements: Vec<Statement>) {
        let script = assemble(&statements, TargetFamily::Posix);
        assert_eq!(
            script.as_str(),
            concat!(
                "#!/bin/sh\n",
                "set -e\n",
                "# write config\n",
                "cat > /etc/app.conf <<-'END'\n",
                "port=8080\n",
                "END\n",
                "export APP_CONF=/etc/app.conf\n",
                "exit $?\n",
            )
        );
        assert_eq!(script.family(), TargetFamily::Posix);
    }

    #[rstest]
    fn windows_script_guards_each_fallible_statement(statements: Vec<Statement>) {
        let script = assemble(&statements, TargetFamily::Windows);
        assert_eq!(
            script.as_str(),
            concat!(
                "@echo off\r\n",
                "rem write config\r\n",
                "copy /y CON \"/etc/app.conf\"\r\n",
                "port=8080\r\n",
                "\u{1a}\r\n",
                "if errorlevel 1 exit /b %ERRORLEVEL%\r\n",
                "set \"APP_CONF=/etc/app.conf\"\r\n",
                "if errorlevel 1 exit /b %ERRORLEVEL%\r\n",
                "exit /b %ERRORLEVEL%\r\n",
            )
        );
    }

    #[rstest]
    #[case(TargetFamily::Posix)]
    #[case(TargetFamily::Windows)]
    fn unframed_scripts_are_plain_concatenation(
        statements: Vec<Statement>,
        #[case] family: TargetFamily,
    ) {
        let script = assemble_with(&statements, family, AssembleOptions { framed: false });
        let expected: String = statements
            .iter()
            .map(|statement| statement.render(family))
            .collect();
        assert_eq!(script.into_string(), expected);
    }

    #[rstest]
    #[case(TargetFamily::Posix, "#!/bin/sh\nset -e\nexit $?\n")]
    #[case(TargetFamily::Windows, "@echo off\r\nexit /b %ERRORLEVEL%\r\n")]
    fn empty_script_still_has_a_frame(#[case] family: TargetFamily, #[case] expected: &str) {
        assert_eq!(assemble(&[], family).as_str(), expected);
    }

    #[rstest]
    fn assembly_is_idempotent(statements: Vec<Statement>) {
        let first = assemble(&statements, TargetFamily::Windows);
        let second = assemble(&statements, TargetFamily::Windows);
        assert_eq!(first, second);
    }

    #[rstest]
    fn script_preserves_push_order(statements: Vec<Statement>) {
        let mut script = Script::new();
        for statement in statements.iter().rev() {
            script.push(statement.clone());
        }
        let reversed: Vec<Statement> = statements.into_iter().rev().collect();
        assert_eq!(script.statements(), reversed.as_slice());
        assert_eq!(script.len(), 3);
        assert!(!script.is_empty());
        assert_eq!(
            script.render(TargetFamily::Posix),
            assemble(&reversed, TargetFamily::Posix)
        );
    }

    #[rstest]
    fn script_collects_from_iterators(statements: Vec<Statement>) {
        let collected: Script = statements.clone().into_iter().collect();
        let mut extended = Script::default();
        extended.extend(statements.clone());
        assert_eq!(collected, extended);
        assert_eq!(collected, Script::from(statements));
        assert_eq!(
            collected
                .render_with(TargetFamily::Posix, AssembleOptions { framed: false })
                .to_string(),
            collected.statements().iter().map(|s| s.render(TargetFamily::Posix)).collect::<String>()
        );
    }
}

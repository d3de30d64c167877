//! Escaping and quoting primitives shared by every statement renderer.
//!
//! POSIX quoting delegates to `shell-escape`. The command interpreter has no
//! equivalent crate rule, so the batch helpers here double `%` and either
//! wrap the value in double quotes or caret-escape its metacharacters. The
//! remaining helpers cover portable `{token}` templates and the single-line
//! policy: a field that must be one line is rejected when it contains a line
//! break, it is never split.

use std::borrow::Cow;

use shell_escape::unix;

use crate::statement::StatementError;
use crate::target::TargetFamily;

/// Characters `cmd.exe` treats as syntax outside a quoted string.
const BATCH_METACHARACTERS: [char; 7] = ['^', '&', '|', '<', '>', '(', ')'];

/// Quotes `value` so the target interpreter reads it as a single literal
/// argument. Values made only of safe characters are returned unchanged.
#[must_use]
pub fn quote_argument(value: &str, family: TargetFamily) -> String {
    match family {
        TargetFamily::Posix => unix::escape(Cow::Borrowed(value)).into_owned(),
        TargetFamily::Windows if is_batch_safe(value) => value.to_owned(),
        TargetFamily::Windows => quote_batch(value),
    }
}

/// Quotes a filesystem path for `family`.
///
/// Windows paths are always double quoted so `+` and spaces stay part of the
/// name in `copy a+b c` forms.
#[must_use]
pub fn quote_path(path: &str, family: TargetFamily) -> String {
    match family {
        TargetFamily::Posix => quote_argument(path, family),
        TargetFamily::Windows => quote_batch(path),
    }
}

/// Wraps `value` in double quotes for a batch file. `%` is doubled and an
/// embedded `"` is written as `""`, which closes and reopens the quoted
/// string so metacharacters never fall outside it.
#[must_use]
pub fn quote_batch(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '%' => quoted.push_str("%%"),
            '"' => quoted.push_str("\"\""),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

/// Escapes `value` for an unquoted batch position: `%` is doubled and `"`
/// plus every metacharacter gets a `^` prefix.
#[must_use]
pub fn caret_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '%' {
            escaped.push_str("%%");
            continue;
        }
        if ch == '"' || BATCH_METACHARACTERS.contains(&ch) {
            escaped.push('^');
        }
        escaped.push(ch);
    }
    escaped
}

/// Doubles `%` so a batch file does not treat it as a variable sigil.
#[must_use]
pub fn batch_literal(value: &str) -> String {
    value.replace('%', "%%")
}

fn is_batch_safe(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | ':' | '\\')
        })
}

/// Rejects blank values for required fields.
///
/// # Errors
///
/// Returns [`StatementError::Invalid`] when `value` is empty or whitespace.
pub fn ensure_present(field: &'static str, value: &str) -> Result<(), StatementError> {
    if value.trim().is_empty() {
        return Err(StatementError::invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Rejects values containing a line break.
///
/// # Errors
///
/// Returns [`StatementError::Invalid`] when `value` contains `\n` or `\r`.
pub fn ensure_single_line(field: &'static str, value: &str) -> Result<(), StatementError> {
    if value.contains(['\n', '\r']) {
        return Err(StatementError::invalid(
            field,
            "must be a single line (line breaks are rejected, not split)",
        ));
    }
    Ok(())
}

/// Requires a shell identifier: an ASCII letter or `_` followed by ASCII
/// letters, digits, or `_`.
///
/// # Errors
///
/// Returns [`StatementError::Invalid`] when `value` is not an identifier.
pub fn ensure_identifier(field: &'static str, value: &str) -> Result<(), StatementError> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    if !valid_start || !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(StatementError::invalid(
            field,
            format!("`{value}` is not a valid identifier"),
        ));
    }
    Ok(())
}

/// Replaces portable `{token}` placeholders with their family specific text.
///
/// Unknown or unterminated placeholders are copied through unchanged.
#[must_use]
pub fn replace_tokens(template: &str, family: TargetFamily) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '{' {
            rendered.push(ch);
            continue;
        }

        let mut name = String::new();
        while let Some(next) = chars.next_if(char::is_ascii_lowercase) {
            name.push(next);
        }
        let closed = chars.next_if_eq(&'}').is_some();
        match (closed, family.token(&name)) {
            (true, Some(value)) => rendered.push_str(value),
            (true, None) => {
                rendered.push('{');
                rendered.push_str(&name);
                rendered.push('}');
            }
            (false, _) => {
                rendered.push('{');
                rendered.push_str(&name);
            }
        }
    }
    rendered
}

/// Rewrites `$NAME` and `${NAME}` references into the family syntax.
///
/// POSIX input is returned unchanged. A `$` that does not start a reference
/// is kept as a literal character.
#[must_use]
pub fn convert_variable_references(template: &str, family: TargetFamily) -> String {
    if !family.is_windows() {
        return template.to_owned();
    }

    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            rendered.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut name = String::new();
        if let Some(first) = chars.next_if(|c| c.is_ascii_alphabetic() || *c == '_') {
            name.push(first);
            while let Some(next) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
                name.push(next);
            }
        }

        let well_formed = !name.is_empty() && (!braced || chars.next_if_eq(&'}').is_some());
        if well_formed {
            rendered.push_str(&family.variable_reference(&name));
        } else {
            rendered.push('$');
            if braced {
                rendered.push('{');
            }
            rendered.push_str(&name);
        }
    }
    rendered
}

/// Splits `text` into lines and terminates each one with the family line
/// terminator. Both `\n` and `\r\n` are accepted as input separators.
#[must_use]
pub fn terminate_lines(text: &str, family: TargetFamily) -> String {
    let terminator = family.line_terminator();
    let mut rendered = String::with_capacity(text.len() + terminator.len());
    for line in text.lines() {
        rendered.push_str(line);
        rendered.push_str(terminator);
    }
    rendered
}

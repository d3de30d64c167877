//! Target family conventions for rendered scripts.
//!
//! A script is rendered for exactly one interpreter family: a POSIX shell or
//! the Windows command interpreter. [`TargetFamily`] carries every
//! convention that differs between the two (line terminators, variable
//! references, comments, portable tokens, and the prologue/epilogue used by
//! the assembler) so that rendering code never branches on ad-hoc strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interpreter family a script is rendered for.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFamily {
    /// POSIX `sh` compatible shells.
    #[default]
    #[serde(alias = "unix", alias = "linux")]
    Posix,
    /// Windows `cmd.exe` batch files.
    #[serde(alias = "win")]
    Windows,
}

/// Raised when a target family name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown target family `{0}`: expected `posix` or `windows`")]
pub struct ParseTargetFamilyError(pub String);

const POSIX_PROLOGUE: &[&str] = &["#!/bin/sh", "set -e"];
const WINDOWS_PROLOGUE: &[&str] = &["@echo off"];

impl TargetFamily {
    /// Returns `true` for the Windows command interpreter.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Line terminator appended to every rendered line.
    #[must_use]
    pub const fn line_terminator(self) -> &'static str {
        match self {
            Self::Posix => "\n",
            Self::Windows => "\r\n",
        }
    }

    /// Token that starts a comment line.
    #[must_use]
    pub const fn comment_token(self) -> &'static str {
        match self {
            Self::Posix => "#",
            Self::Windows => "rem",
        }
    }

    /// Directory separator used in paths.
    #[must_use]
    pub const fn file_separator(self) -> &'static str {
        match self {
            Self::Posix => "/",
            Self::Windows => "\\",
        }
    }

    /// Separator used between entries of `PATH`-like variables.
    #[must_use]
    pub const fn path_separator(self) -> &'static str {
        match self {
            Self::Posix => ":",
            Self::Windows => ";",
        }
    }

    /// Renders a reference to the variable `name` (`$NAME` or `%NAME%`).
    #[must_use]
    pub fn variable_reference(self, name: &str) -> String {
        match self {
            Self::Posix => format!("${name}"),
            Self::Windows => format!("%{name}%"),
        }
    }

    /// Lines emitted before the first statement of a framed script.
    #[must_use]
    pub const fn prologue(self) -> &'static [&'static str] {
        match self {
            Self::Posix => POSIX_PROLOGUE,
            Self::Windows => WINDOWS_PROLOGUE,
        }
    }

    /// Final line of a framed script, propagating the last exit status.
    #[must_use]
    pub const fn epilogue(self) -> &'static str {
        match self {
            Self::Posix => "exit $?",
            Self::Windows => "exit /b %ERRORLEVEL%",
        }
    }

    /// Line inserted after each statement so the first failure aborts the
    /// script. POSIX scripts rely on `set -e` instead.
    #[must_use]
    pub const fn error_guard(self) -> Option<&'static str> {
        match self {
            Self::Posix => None,
            Self::Windows => Some("if errorlevel 1 exit /b %ERRORLEVEL%"),
        }
    }

    /// Resolves a portable `{token}` name to its family specific text.
    ///
    /// Returns `None` for names that are not portable tokens.
    #[must_use]
    pub fn token(self, name: &str) -> Option<&'static str> {
        let windows = self.is_windows();
        let value = match name {
            "lf" => self.line_terminator(),
            "varl" => {
                if windows {
                    "%"
                } else {
                    "$"
                }
            }
            "varr" => {
                if windows {
                    "%"
                } else {
                    ""
                }
            }
            "rem" => self.comment_token(),
            "fs" => self.file_separator(),
            "ps" => self.path_separator(),
            "sh" => {
                if windows {
                    "cmd"
                } else {
                    "sh"
                }
            }
            "args" => {
                if windows {
                    "%*"
                } else {
                    "$@"
                }
            }
            "return" => {
                if windows {
                    "exit /b"
                } else {
                    "return"
                }
            }
            "exit" => {
                if windows {
                    "exit /b"
                } else {
                    "exit"
                }
            }
            _ => return None,
        };
        Some(value)
    }

    /// Lower-case name used in configuration and manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for TargetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFamily {
    type Err = ParseTargetFamilyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "posix" | "unix" | "linux" => Ok(Self::Posix),
            "windows" | "win" => Ok(Self::Windows),
            _ => Err(ParseTargetFamilyError(value.to_owned())),
        }
    }
}

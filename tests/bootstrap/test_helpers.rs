//! Shared fixtures for bootstrap rendering scenarios.

use bootscript::{FileStatementBuilder, Statement, StatementError};
use rstest::fixture;

/// Outcome of the `when` step.
#[derive(Clone, Debug)]
pub enum RenderOutcome {
    Rendered(String),
    Rejected(StatementError),
}

#[derive(Clone, Debug)]
pub struct BootstrapContext {
    pub builder: FileStatementBuilder,
    pub outcome: Option<RenderOutcome>,
}

impl BootstrapContext {
    pub fn rendered(&self) -> Option<&str> {
        match self.outcome {
            Some(RenderOutcome::Rendered(ref text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[fixture]
pub fn bootstrap_context() -> BootstrapContext {
    BootstrapContext {
        builder: Statement::file(),
        outcome: None,
    }
}

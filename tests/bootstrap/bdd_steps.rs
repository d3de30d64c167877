//! BDD step definitions for bootstrap file statements.

use bootscript::{Statement, StatementError, TargetFamily};
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{BootstrapContext, RenderOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("invalid target family: {0}")]
    Target(#[from] bootscript::ParseTargetFamilyError),
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a file statement for \"{path}\" with lines \"{lines}\"")]
fn file_statement(
    bootstrap_context: BootstrapContext,
    path: String,
    lines: String,
) -> BootstrapContext {
    let BootstrapContext { builder, outcome } = bootstrap_context;
    BootstrapContext {
        builder: builder.path(path).lines(lines.split(',')),
        outcome,
    }
}

#[given("the heredoc delimiter \"{delimiter}\"")]
fn heredoc_delimiter(bootstrap_context: BootstrapContext, delimiter: String) -> BootstrapContext {
    let BootstrapContext { builder, outcome } = bootstrap_context;
    BootstrapContext {
        builder: builder.delimiter(delimiter),
        outcome,
    }
}

#[given("variable expansion is enabled")]
fn expansion_enabled(bootstrap_context: BootstrapContext) -> BootstrapContext {
    let BootstrapContext { builder, outcome } = bootstrap_context;
    BootstrapContext {
        builder: builder.expand_variables(true),
        outcome,
    }
}

fn render_with(
    bootstrap_context: BootstrapContext,
    family: &str,
    build: fn(bootscript::FileStatementBuilder) -> Result<Statement, StatementError>,
) -> Result<BootstrapContext, StepError> {
    let target = family.parse::<TargetFamily>()?;
    let BootstrapContext { builder, .. } = bootstrap_context;
    let outcome = match build(builder.clone()) {
        Ok(statement) => RenderOutcome::Rendered(statement.render(target)),
        Err(err) => RenderOutcome::Rejected(err),
    };
    Ok(BootstrapContext {
        builder,
        outcome: Some(outcome),
    })
}

#[when("I render a create-or-overwrite statement for \"{family}\"")]
fn render_create(
    bootstrap_context: BootstrapContext,
    family: String,
) -> Result<BootstrapContext, StepError> {
    render_with(
        bootstrap_context,
        &family,
        bootscript::FileStatementBuilder::build_create_or_overwrite,
    )
}

#[when("I render an append statement for \"{family}\"")]
fn render_append(
    bootstrap_context: BootstrapContext,
    family: String,
) -> Result<BootstrapContext, StepError> {
    render_with(
        bootstrap_context,
        &family,
        bootscript::FileStatementBuilder::build_append,
    )
}

fn rendered_text(bootstrap_context: &BootstrapContext) -> Result<&str, StepError> {
    bootstrap_context.rendered().ok_or_else(|| {
        StepError::Assertion(format!(
            "expected a rendered statement, got {:?}",
            bootstrap_context.outcome
        ))
    })
}

#[then("the rendered statement contains \"{snippet}\"")]
fn rendered_contains(
    bootstrap_context: &BootstrapContext,
    snippet: String,
) -> Result<(), StepError> {
    let rendered = rendered_text(bootstrap_context)?;
    if rendered.contains(&snippet) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected `{snippet}` in rendered statement:\n{rendered}"
        )))
    }
}

#[then("the rendered statement does not contain \"{snippet}\"")]
fn rendered_omits(
    bootstrap_context: &BootstrapContext,
    snippet: String,
) -> Result<(), StepError> {
    let rendered = rendered_text(bootstrap_context)?;
    if rendered.contains(&snippet) {
        Err(StepError::Assertion(format!(
            "unexpected `{snippet}` in rendered statement:\n{rendered}"
        )))
    } else {
        Ok(())
    }
}

#[then("rendering fails with a delimiter collision on line \"{line}\"")]
fn delimiter_collision(
    bootstrap_context: &BootstrapContext,
    line: usize,
) -> Result<(), StepError> {
    match bootstrap_context.outcome {
        Some(RenderOutcome::Rejected(StatementError::DelimiterCollision {
            line: actual, ..
        })) if actual == line => Ok(()),
        ref other => Err(StepError::Assertion(format!(
            "expected a delimiter collision on line {line}, got {other:?}"
        ))),
    }
}

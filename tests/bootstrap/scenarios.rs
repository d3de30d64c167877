//! BDD scenarios for bootstrap file statements.

use rstest_bdd_macros::scenario;

use super::test_helpers::{BootstrapContext, bootstrap_context};

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Create a file on a POSIX target"
)]
fn scenario_posix_create(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Append to a file on a POSIX target"
)]
fn scenario_posix_append(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Expand variables inside the body"
)]
fn scenario_posix_expand(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Create a file on a Windows target"
)]
fn scenario_windows_create(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Append on a Windows target keeps existing content"
)]
fn scenario_windows_append(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

#[scenario(
    path = "tests/features/bootstrap_script.feature",
    name = "Reject a body line that matches the delimiter"
)]
fn scenario_delimiter_collision(bootstrap_context: BootstrapContext) {
    let _ = bootstrap_context;
}

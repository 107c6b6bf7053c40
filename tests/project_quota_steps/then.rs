//! Then steps for project quota BDD scenarios.

use super::world::{ProjectQuotaWorld, run_async};
use rstest_bdd_macros::then;
use todolist::todo::{
    domain::Project,
    services::{BusinessRuleViolation, TodoServiceError},
};

fn last_creation(world: &ProjectQuotaWorld) -> Result<&Result<Project, TodoServiceError>, eyre::Report> {
    world
        .last_creation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no project creation was attempted"))
}

#[then("creation fails with a business rule violation")]
fn creation_fails_with_business_rule(world: &ProjectQuotaWorld) -> Result<(), eyre::Report> {
    let result = last_creation(world)?;
    eyre::ensure!(
        matches!(
            result,
            Err(TodoServiceError::BusinessRule(
                BusinessRuleViolation::ProjectLimitReached { .. }
            ))
        ),
        "expected ProjectLimitReached, got {result:?}"
    );
    Ok(())
}

#[then("creation fails with a duplicate name error")]
fn creation_fails_with_duplicate(world: &ProjectQuotaWorld) -> Result<(), eyre::Report> {
    let result = last_creation(world)?;
    eyre::ensure!(
        matches!(
            result,
            Err(TodoServiceError::BusinessRule(
                BusinessRuleViolation::DuplicateProjectName(_)
            ))
        ),
        "expected DuplicateProjectName, got {result:?}"
    );
    Ok(())
}

#[then("creation succeeds")]
fn creation_succeeds(world: &ProjectQuotaWorld) -> Result<(), eyre::Report> {
    let result = last_creation(world)?;
    eyre::ensure!(result.is_ok(), "expected creation to succeed, got {result:?}");
    Ok(())
}

#[then("{count:usize} project is listed")]
fn projects_listed(world: &ProjectQuotaWorld, count: usize) -> Result<(), eyre::Report> {
    let listed = run_async(world.manager.list_all_projects())?;
    eyre::ensure!(
        listed.len() == count,
        "expected {count} projects, found {}",
        listed.len()
    );
    Ok(())
}

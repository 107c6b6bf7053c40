//! When steps for project quota BDD scenarios.

use super::world::{ProjectQuotaWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the project "{name}" is created"#)]
fn project_is_created(world: &mut ProjectQuotaWorld, name: String) {
    let result = run_async(world.manager.create_project(name.clone(), ""));
    if let Ok(ref project) = result {
        world.projects.insert(name, project.clone());
    }
    world.last_creation = Some(result);
}

#[when(r#"the project "{name}" is deleted"#)]
fn project_is_deleted(world: &mut ProjectQuotaWorld, name: String) -> Result<(), eyre::Report> {
    let project = world
        .projects
        .remove(&name)
        .ok_or_else(|| eyre::eyre!("missing project '{name}' in scenario world"))?;
    let removed = run_async(world.manager.delete_project(project.id()))
        .wrap_err("delete project in scenario")?;
    eyre::ensure!(removed, "project '{name}' was not removed");
    Ok(())
}

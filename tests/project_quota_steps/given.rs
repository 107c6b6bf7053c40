//! Given steps for project quota BDD scenarios.

use super::world::{ProjectQuotaWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todolist::todo::domain::TodoLimits;

#[given("a todo list allowing {max:usize} project")]
fn todo_list_allowing(world: &mut ProjectQuotaWorld, max: usize) {
    *world = ProjectQuotaWorld::with_limits(TodoLimits::default().with_max_projects(max));
}

#[given(r#"the project "{name}" exists"#)]
fn project_exists(world: &mut ProjectQuotaWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(world.manager.create_project(name.clone(), ""))
        .wrap_err("create project in scenario setup")?;
    world.projects.insert(name, project);
    Ok(())
}

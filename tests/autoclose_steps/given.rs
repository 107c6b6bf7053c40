//! Given steps for auto-close BDD scenarios.

use super::world::{AutocloseWorld, run_async};
use chrono::{DateTime, Duration, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todolist::todo::{domain::TaskStatus, services::AddTaskRequest};

fn add_task(
    world: &mut AutocloseWorld,
    title: String,
    deadline: Option<DateTime<Utc>>,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?
        .id();
    let request = AddTaskRequest::new(project_id, title.clone()).with_optional_deadline(deadline);
    let task = run_async(world.manager.add_task_to_project(request))
        .wrap_err("add task in scenario setup")?;
    world.tasks.insert(title, task);
    Ok(())
}

#[given(r#"a project "{name}""#)]
fn a_project(world: &mut AutocloseWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(world.manager.create_project(name, ""))
        .wrap_err("create project in scenario setup")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task "{title}" due {hours:i64} hours ago"#)]
fn a_task_due_in_the_past(
    world: &mut AutocloseWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    add_task(world, title, Some(Utc::now() - Duration::hours(hours)))
}

#[given(r#"a task "{title}" due in {hours:i64} hours"#)]
fn a_task_due_in_the_future(
    world: &mut AutocloseWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    add_task(world, title, Some(Utc::now() + Duration::hours(hours)))
}

#[given(r#"a task "{title}" without a deadline"#)]
fn a_task_without_deadline(world: &mut AutocloseWorld, title: String) -> Result<(), eyre::Report> {
    add_task(world, title, None)
}

#[given(r#"a finished task "{title}" due {hours:i64} hours ago"#)]
fn a_finished_task(
    world: &mut AutocloseWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    add_task(world, title.clone(), Some(Utc::now() - Duration::hours(hours)))?;
    let task_id = world.task(&title)?.id();
    let finished = run_async(world.manager.change_task_status(task_id, TaskStatus::Done))
        .wrap_err("finish task in scenario setup")?;
    world.tasks.insert(title, finished);
    Ok(())
}

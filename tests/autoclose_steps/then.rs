//! Then steps for auto-close BDD scenarios.

use super::world::{AutocloseWorld, run_async};
use rstest_bdd_macros::then;
use todolist::todo::domain::{Task, TaskStatus};

fn reload(world: &AutocloseWorld, title: &str) -> Result<Task, eyre::Report> {
    let task_id = world.task(title)?.id();
    run_async(world.manager.get_task(None, task_id))?
        .ok_or_else(|| eyre::eyre!("task '{title}' no longer exists"))
}

#[then("the job reports {count:usize} closed")]
fn job_reports(world: &AutocloseWorld, count: usize) -> Result<(), eyre::Report> {
    let closed = world
        .last_closed
        .ok_or_else(|| eyre::eyre!("the auto-close job has not run"))?;
    eyre::ensure!(closed == count, "expected {count} closed, found {closed}");
    Ok(())
}

#[then(r#"the task "{title}" is done with a closed timestamp"#)]
fn task_is_done(world: &AutocloseWorld, title: String) -> Result<(), eyre::Report> {
    let task = reload(world, &title)?;
    eyre::ensure!(
        task.status() == TaskStatus::Done,
        "expected '{title}' to be done, found {}",
        task.status()
    );
    eyre::ensure!(task.closed_at().is_some(), "'{title}' has no closed timestamp");
    Ok(())
}

#[then(r#"the task "{title}" is still open"#)]
fn task_is_open(world: &AutocloseWorld, title: String) -> Result<(), eyre::Report> {
    let task = reload(world, &title)?;
    eyre::ensure!(
        !task.status().is_done(),
        "expected '{title}' to stay open, found {}",
        task.status()
    );
    eyre::ensure!(task.closed_at().is_none(), "'{title}' has a closed timestamp");
    Ok(())
}

#[then(r#"the task "{title}" keeps its closed timestamp"#)]
fn task_keeps_closed_timestamp(world: &AutocloseWorld, title: String) -> Result<(), eyre::Report> {
    let before = world.task(&title)?.closed_at();
    let after = reload(world, &title)?.closed_at();
    eyre::ensure!(
        before.is_some() && before == after,
        "closed timestamp of '{title}' changed from {before:?} to {after:?}"
    );
    Ok(())
}

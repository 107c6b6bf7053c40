//! When steps for auto-close BDD scenarios.

use super::world::{AutocloseWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use todolist::todo::services::autoclose_overdue_tasks;

#[when("the auto-close job runs")]
fn the_job_runs(world: &mut AutocloseWorld) -> Result<(), eyre::Report> {
    let closed = run_async(autoclose_overdue_tasks(&*world.store, &DefaultClock))
        .wrap_err("run auto-close job")?;
    world.last_closed = Some(closed);
    Ok(())
}

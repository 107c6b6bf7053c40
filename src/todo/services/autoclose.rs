//! Auto-close job for overdue tasks.

use crate::todo::{
    domain::TaskStatus,
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;

/// Marks every overdue, unfinished task as done and returns how many were
/// closed.
///
/// Safe to call repeatedly: once closed, a task is no longer overdue. Quotas
/// are not consulted.
///
/// # Errors
///
/// Returns the first repository failure; tasks closed before the failure
/// stay closed.
pub async fn autoclose_overdue_tasks<R, C>(tasks: &R, clock: &C) -> TaskRepositoryResult<usize>
where
    R: TaskRepository + ?Sized,
    C: Clock,
{
    let overdue = tasks.get_overdue_tasks().await?;

    let mut closed = 0_usize;
    for mut task in overdue {
        if task.status().is_done() {
            continue;
        }
        task.update_status(TaskStatus::Done, clock);
        tasks.update(&task).await?;
        tracing::debug!(task_id = %task.id(), project_id = %task.project_id(), "auto-closed overdue task");
        closed += 1;
    }

    if closed > 0 {
        tracing::info!(closed, "auto-closed overdue tasks");
    } else {
        tracing::debug!("no overdue tasks found");
    }
    Ok(closed)
}

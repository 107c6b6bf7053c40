//! Task repository contract tests against the in-memory store.

use super::helpers::{add_project, add_task, store};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use todolist::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{ProjectId, TaskDescription, TaskStatus, TaskTitle, TodoLimits},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_requires_existing_project(store: InMemoryTodoStore) -> eyre::Result<()> {
    let limits = TodoLimits::default();
    let missing = ProjectId::new();

    let result = TaskRepository::create(
        &store,
        missing,
        &TaskTitle::new("Orphan", &limits)?,
        &TaskDescription::new("", &limits)?,
        None,
    )
    .await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::ProjectNotFound(id)) if id == missing),
        "expected ProjectNotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_scoped_and_counted_per_project(store: InMemoryTodoStore) -> eyre::Result<()> {
    let home = add_project(&store, "Home").await?;
    let work = add_project(&store, "Work").await?;
    let dishes = add_task(&store, home.id(), "Dishes", None).await?;
    let laundry = add_task(&store, home.id(), "Laundry", None).await?;
    add_task(&store, work.id(), "Report", None).await?;

    let home_tasks = store.get_by_project_id(home.id()).await?;

    eyre::ensure!(home_tasks == vec![dishes, laundry], "home tasks in creation order");
    eyre::ensure!(store.count_by_project(home.id()).await? == 2, "home holds two tasks");
    eyre::ensure!(store.count_by_project(work.id()).await? == 1, "work holds one task");
    eyre::ensure!(
        store.count_by_project(ProjectId::new()).await? == 0,
        "unknown projects hold no tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_status_and_closed_timestamp(store: InMemoryTodoStore) -> eyre::Result<()> {
    let project = add_project(&store, "Home").await?;
    let mut task = add_task(&store, project.id(), "Dishes", None).await?;

    task.update_status(TaskStatus::Done, &DefaultClock);
    let stored = TaskRepository::update(&store, &task).await?;
    let reloaded = TaskRepository::get_by_id(&store, task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(stored == task, "update should return the stored task");
    eyre::ensure!(reloaded.status() == TaskStatus::Done, "status should persist");
    eyre::ensure!(reloaded.closed_at().is_some(), "closed_at should persist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_deleted_task(store: InMemoryTodoStore) -> eyre::Result<()> {
    let project = add_project(&store, "Home").await?;
    let task = add_task(&store, project.id(), "Ephemeral", None).await?;
    eyre::ensure!(TaskRepository::delete(&store, task.id()).await?, "delete should report removal");

    let result = TaskRepository::update(&store, &task).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_lookup_skips_done_future_and_undated_tasks(
    store: InMemoryTodoStore,
) -> eyre::Result<()> {
    let project = add_project(&store, "Deadlines").await?;
    let past = Some(Utc::now() - Duration::hours(1));
    let late = add_task(&store, project.id(), "Late", past).await?;
    let mut finished = add_task(&store, project.id(), "Finished", past).await?;
    finished.update_status(TaskStatus::Done, &DefaultClock);
    TaskRepository::update(&store, &finished).await?;
    add_task(&store, project.id(), "Upcoming", Some(Utc::now() + Duration::hours(1))).await?;
    add_task(&store, project.id(), "Undated", None).await?;

    let overdue = store.get_overdue_tasks().await?;

    eyre::ensure!(overdue == vec![late], "only the late open task is overdue, got {overdue:?}");
    Ok(())
}

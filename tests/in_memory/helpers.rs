//! Shared test helpers for in-memory repository integration tests.

use chrono::{DateTime, Utc};
use rstest::fixture;
use todolist::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{
        Project, ProjectDescription, ProjectId, ProjectName, Task, TaskDescription, TaskTitle,
        TodoLimits,
    },
    ports::{ProjectRepository, TaskRepository},
};

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemoryTodoStore {
    InMemoryTodoStore::new()
}

/// Stores a project with an empty description.
///
/// # Errors
///
/// Returns an error if the name is invalid or the store rejects it.
pub async fn add_project(store: &InMemoryTodoStore, name: &str) -> eyre::Result<Project> {
    let limits = TodoLimits::default();
    let project = ProjectRepository::create(
        store,
        &ProjectName::new(name, &limits)?,
        &ProjectDescription::new("", &limits)?,
    )
    .await?;
    Ok(project)
}

/// Stores a task with an empty description.
///
/// # Errors
///
/// Returns an error if the title is invalid or the store rejects it.
pub async fn add_task(
    store: &InMemoryTodoStore,
    project_id: ProjectId,
    title: &str,
    deadline: Option<DateTime<Utc>>,
) -> eyre::Result<Task> {
    let limits = TodoLimits::default();
    let task = TaskRepository::create(
        store,
        project_id,
        &TaskTitle::new(title, &limits)?,
        &TaskDescription::new("", &limits)?,
        deadline,
    )
    .await?;
    Ok(task)
}

//! Repository ports for project and task persistence.
//!
//! Implementations generate identities and creation timestamps, order
//! listings by creation time ascending, and delete a project's tasks along
//! with the project.

use crate::todo::domain::{
    Project, ProjectDescription, ProjectId, ProjectName, Task, TaskDescription, TaskId, TaskTitle,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Creates and stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateName`] when another project
    /// already uses the name, ignoring case.
    async fn create(
        &self,
        name: &ProjectName,
        description: &ProjectDescription,
    ) -> ProjectRepositoryResult<Project>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn get_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by name, ignoring case.
    ///
    /// Returns `None` when no project uses the name.
    async fn get_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project ordered by creation time ascending.
    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Persists changes to an existing project and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateName`] when a different
    /// project already uses the name, or [`ProjectRepositoryError::NotFound`]
    /// when the project does not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project>;

    /// Deletes a project and all of its tasks.
    ///
    /// Returns `false` when the project does not exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;

    /// Returns the number of stored projects.
    async fn count(&self) -> ProjectRepositoryResult<usize>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Creates and stores a new task in [`crate::todo::domain::TaskStatus::Todo`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the parent
    /// project does not exist.
    async fn create(
        &self,
        project_id: ProjectId,
        title: &TaskTitle,
        description: &TaskDescription,
        deadline: Option<DateTime<Utc>>,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a project ordered by creation time ascending.
    async fn get_by_project_id(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists changes to an existing task and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Deletes a task.
    ///
    /// Returns `false` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns the number of tasks held by a project.
    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Returns every task whose deadline has passed and that is not done.
    ///
    /// No ordering is guaranteed.
    async fn get_overdue_tasks(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// Another project already uses the name, ignoring case.
    #[error("a project named '{0}' already exists")]
    DuplicateName(String),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The parent project referenced by a new task does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

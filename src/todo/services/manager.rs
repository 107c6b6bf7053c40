//! Project and task orchestration enforcing quotas and validation.

use super::error::{BusinessRuleViolation, TodoServiceError, TodoServiceResult};
use crate::todo::{
    domain::{
        Project, ProjectDescription, ProjectId, ProjectName, Task, TaskDescription, TaskId,
        TaskStatus, TaskTitle, TodoLimits,
    },
    ports::{ProjectRepository, ProjectRepositoryError, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Optional overwrites for a project's details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    name: Option<String>,
    description: Option<String>,
}

impl ProjectChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the project name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for adding a task to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    deadline: Option<DateTime<Utc>>,
}

impl AddTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets or clears the task deadline.
    #[must_use]
    pub const fn with_optional_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Optional overwrites for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the task title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Moves the task to a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Orchestrates project and task operations over the repository ports.
///
/// Input is validated before any repository access. Quotas are checked only
/// when creating projects and tasks.
pub struct TodoListManager<P, T, C>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    limits: TodoLimits,
}

impl<P, T, C> Clone for TodoListManager<P, T, C>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
            limits: self.limits,
        }
    }
}

impl<P, T, C> TodoListManager<P, T, C>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a manager over the given repositories and limits.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>, limits: TodoLimits) -> Self {
        Self {
            projects,
            tasks,
            clock,
            limits,
        }
    }

    /// Returns the limits this manager enforces.
    #[must_use]
    pub const fn limits(&self) -> &TodoLimits {
        &self.limits
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] for a malformed name or
    /// description, and [`TodoServiceError::BusinessRule`] when the project
    /// quota is reached or the name is already taken.
    pub async fn create_project(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> TodoServiceResult<Project> {
        let project_name = ProjectName::new(name, &self.limits)?;
        let project_description = ProjectDescription::new(description, &self.limits)?;

        let existing = self.projects.count().await?;
        if existing >= self.limits.max_projects {
            tracing::warn!(
                existing,
                max = self.limits.max_projects,
                "project quota reached"
            );
            return Err(BusinessRuleViolation::ProjectLimitReached {
                max: self.limits.max_projects,
            }
            .into());
        }

        let project = self
            .projects
            .create(&project_name, &project_description)
            .await
            .inspect_err(log_rejection)?;
        tracing::debug!(project_id = %project.id(), name = %project.name(), "created project");
        Ok(project)
    }

    /// Overwrites whichever project details are provided.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ProjectNotFound`] when the project does not
    /// exist, [`TodoServiceError::Validation`] for malformed input and
    /// [`TodoServiceError::BusinessRule`] when the new name is taken.
    pub async fn edit_project(
        &self,
        project_id: ProjectId,
        changes: ProjectChanges,
    ) -> TodoServiceResult<Project> {
        let name = changes
            .name
            .map(|value| ProjectName::new(value, &self.limits))
            .transpose()?;
        let description = changes
            .description
            .map(|value| ProjectDescription::new(value, &self.limits))
            .transpose()?;

        let mut project = self.require_project(project_id).await?;
        project.update_details(name, description);
        let updated = self
            .projects
            .update(&project)
            .await
            .inspect_err(log_rejection)?;
        tracing::debug!(project_id = %updated.id(), "edited project");
        Ok(updated)
    }

    /// Deletes a project and, through the repository, its tasks.
    ///
    /// Returns whether a project was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ProjectRepository`] when persistence fails.
    pub async fn delete_project(&self, project_id: ProjectId) -> TodoServiceResult<bool> {
        let removed = self.projects.delete(project_id).await?;
        tracing::debug!(%project_id, removed, "deleted project");
        Ok(removed)
    }

    /// Adds a task to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] for malformed input,
    /// [`TodoServiceError::ProjectNotFound`] when the project does not exist
    /// and [`TodoServiceError::BusinessRule`] when the project's task quota is
    /// reached.
    pub async fn add_task_to_project(&self, request: AddTaskRequest) -> TodoServiceResult<Task> {
        let title = TaskTitle::new(request.title, &self.limits)?;
        let description = TaskDescription::new(request.description, &self.limits)?;
        let project_id = request.project_id;

        self.require_project(project_id).await?;

        let existing = self.tasks.count_by_project(project_id).await?;
        if existing >= self.limits.max_tasks_per_project {
            tracing::warn!(
                %project_id,
                existing,
                max = self.limits.max_tasks_per_project,
                "task quota reached"
            );
            return Err(BusinessRuleViolation::TaskLimitReached {
                project_id,
                max: self.limits.max_tasks_per_project,
            }
            .into());
        }

        let task = self
            .tasks
            .create(project_id, &title, &description, request.deadline)
            .await?;
        tracing::debug!(task_id = %task.id(), %project_id, "added task");
        Ok(task)
    }

    /// Moves a task to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn change_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TodoServiceResult<Task> {
        let mut task = self.require_task(task_id).await?;
        let previous = task.status();
        task.update_status(status, &*self.clock);
        let updated = self.tasks.update(&task).await?;
        tracing::debug!(%task_id, from = %previous, to = %status, "changed task status");
        Ok(updated)
    }

    /// Overwrites whichever task fields are provided.
    ///
    /// A provided status goes through the same transition as
    /// [`Self::change_task_status`].
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] for malformed input and
    /// [`TodoServiceError::TaskNotFound`] when the task does not exist.
    pub async fn edit_task(&self, task_id: TaskId, changes: TaskChanges) -> TodoServiceResult<Task> {
        let title = changes
            .title
            .map(|value| TaskTitle::new(value, &self.limits))
            .transpose()?;
        let description = changes
            .description
            .map(|value| TaskDescription::new(value, &self.limits))
            .transpose()?;

        let mut task = self.require_task(task_id).await?;
        task.update_details(title, description, changes.deadline);
        if let Some(status) = changes.status {
            task.update_status(status, &*self.clock);
        }
        let updated = self.tasks.update(&task).await?;
        tracing::debug!(%task_id, "edited task");
        Ok(updated)
    }

    /// Deletes a task. Returns whether a task was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskRepository`] when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TodoServiceResult<bool> {
        let removed = self.tasks.delete(task_id).await?;
        tracing::debug!(%task_id, removed, "deleted task");
        Ok(removed)
    }

    /// Lists every project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ProjectRepository`] when persistence fails.
    pub async fn list_all_projects(&self) -> TodoServiceResult<Vec<Project>> {
        Ok(self.projects.get_all().await?)
    }

    /// Lists a project's tasks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ProjectNotFound`] when the project does not
    /// exist.
    pub async fn list_project_tasks(&self, project_id: ProjectId) -> TodoServiceResult<Vec<Task>> {
        self.require_project(project_id).await?;
        Ok(self.tasks.get_by_project_id(project_id).await?)
    }

    /// Looks up a project.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ProjectRepository`] when persistence fails.
    pub async fn get_project(&self, project_id: ProjectId) -> TodoServiceResult<Option<Project>> {
        Ok(self.projects.get_by_id(project_id).await?)
    }

    /// Looks up a task, optionally scoped to a project.
    ///
    /// A task that belongs to a different project than the one given is
    /// reported as absent.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskRepository`] when persistence fails.
    pub async fn get_task(
        &self,
        project_id: Option<ProjectId>,
        task_id: TaskId,
    ) -> TodoServiceResult<Option<Task>> {
        let task = self.tasks.get_by_id(task_id).await?;
        Ok(task.filter(|found| project_id.is_none_or(|expected| found.project_id() == expected)))
    }

    /// Counts a project's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskRepository`] when persistence fails.
    pub async fn count_project_tasks(&self, project_id: ProjectId) -> TodoServiceResult<usize> {
        Ok(self.tasks.count_by_project(project_id).await?)
    }

    async fn require_project(&self, project_id: ProjectId) -> TodoServiceResult<Project> {
        self.projects
            .get_by_id(project_id)
            .await?
            .ok_or(TodoServiceError::ProjectNotFound(project_id))
    }

    async fn require_task(&self, task_id: TaskId) -> TodoServiceResult<Task> {
        self.tasks
            .get_by_id(task_id)
            .await?
            .ok_or(TodoServiceError::TaskNotFound(task_id))
    }
}

fn log_rejection(err: &ProjectRepositoryError) {
    if let ProjectRepositoryError::DuplicateName(name) = err {
        tracing::warn!(%name, "project name already taken");
    }
}

//! Response envelope and payload views.
//!
//! Successful responses are wrapped as `{ "success": true, "data": ... }`.

use crate::todo::domain::{Project, ProjectId, Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Standard `{ "success": true, "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for this envelope.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct HealthView {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Human-readable note.
    pub message: &'static str,
}

/// Project as exposed over HTTP.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Number of tasks in the project, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<usize>,
}

impl ProjectView {
    /// Builds a view with a known task count.
    #[must_use]
    pub fn with_task_count(project: &Project, task_count: usize) -> Self {
        Self {
            task_count: Some(task_count),
            ..Self::from(project)
        }
    }
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            created_at: project.created_at(),
            task_count: None,
        }
    }
}

/// Task as exposed over HTTP.
#[derive(Debug, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, present exactly when the task is done.
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status(),
            deadline: task.deadline(),
            created_at: task.created_at(),
            closed_at: task.closed_at(),
        }
    }
}

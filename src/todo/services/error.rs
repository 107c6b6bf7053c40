//! Service-level error vocabulary shared by every manager operation.

use crate::todo::{
    domain::{ProjectId, TaskId, TodoDomainError},
    ports::{ProjectRepositoryError, TaskRepositoryError},
};
use thiserror::Error;

/// Domain constraint failures, distinct from malformed input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BusinessRuleViolation {
    /// The configured number of projects already exists.
    #[error("cannot create more than {max} projects")]
    ProjectLimitReached {
        /// Configured project quota.
        max: usize,
    },

    /// The project already holds its configured number of tasks.
    #[error("cannot add more than {max} tasks to project {project_id}")]
    TaskLimitReached {
        /// Project whose quota is exhausted.
        project_id: ProjectId,
        /// Configured per-project quota.
        max: usize,
    },

    /// Another project already uses the name, ignoring case.
    #[error("a project named '{0}' already exists")]
    DuplicateProjectName(String),
}

/// Service-level errors for project and task operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] TodoDomainError),

    /// No project exists with the given identifier.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// A quota or uniqueness rule rejected the operation.
    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleViolation),

    /// Project persistence failed.
    #[error(transparent)]
    ProjectRepository(ProjectRepositoryError),

    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(TaskRepositoryError),
}

/// Result type for manager operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Coarse classification used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced project or task does not exist.
    NotFound,
    /// A project name collides with an existing one.
    Duplicate,
    /// A quota was exceeded.
    BusinessRule,
    /// Input was malformed.
    Validation,
    /// An infrastructure failure.
    Internal,
}

impl TodoServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ProjectNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::BusinessRule(BusinessRuleViolation::DuplicateProjectName(_)) => {
                ErrorKind::Duplicate
            }
            Self::BusinessRule(_) => ErrorKind::BusinessRule,
            Self::ProjectRepository(_) | Self::TaskRepository(_) => ErrorKind::Internal,
        }
    }
}

impl From<ProjectRepositoryError> for TodoServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::DuplicateName(name) => {
                Self::BusinessRule(BusinessRuleViolation::DuplicateProjectName(name))
            }
            ProjectRepositoryError::NotFound(id) => Self::ProjectNotFound(id),
            other @ ProjectRepositoryError::Persistence(_) => Self::ProjectRepository(other),
        }
    }
}

impl From<TaskRepositoryError> for TodoServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            TaskRepositoryError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::TaskRepository(other),
        }
    }
}

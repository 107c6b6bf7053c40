//! Error types for project and task validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or reconstructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the configured limit.
    #[error("project name is {actual} characters, limit is {max}")]
    ProjectNameTooLong {
        /// Configured maximum length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The project description exceeds the configured limit.
    #[error("project description is {actual} characters, limit is {max}")]
    ProjectDescriptionTooLong {
        /// Configured maximum length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the configured limit.
    #[error("task title is {actual} characters, limit is {max}")]
    TaskTitleTooLong {
        /// Configured maximum length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The task description exceeds the configured limit.
    #[error("task description is {actual} characters, limit is {max}")]
    TaskDescriptionTooLong {
        /// Configured maximum length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// A persisted task has a closed timestamp that disagrees with its status.
    #[error("task {0} has a closed timestamp inconsistent with its status")]
    ClosedTimestampMismatch(TaskId),
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

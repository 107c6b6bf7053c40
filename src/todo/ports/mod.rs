//! Port contracts for project and task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the manager and
//! the auto-close job.

pub mod repository;

pub use repository::{
    ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};

//! Domain model for projects and tasks.
//!
//! Entities guard their own invariants (notably the coupling between a
//! task's status and its closed timestamp); validation limits arrive as an
//! explicit [`TodoLimits`] value rather than ambient settings.

mod error;
mod ids;
mod limits;
mod project;
mod task;
mod text;

pub use error::{ParseTaskStatusError, TodoDomainError};
pub use ids::{ProjectId, TaskId};
pub use limits::TodoLimits;
pub use project::{PersistedProjectData, Project};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use text::{ProjectDescription, ProjectName, TaskDescription, TaskTitle};

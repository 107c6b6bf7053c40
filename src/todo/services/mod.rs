//! Application services for project and task orchestration.

mod autoclose;
mod error;
mod manager;

pub use autoclose::autoclose_overdue_tasks;
pub use error::{BusinessRuleViolation, ErrorKind, TodoServiceError, TodoServiceResult};
pub use manager::{AddTaskRequest, ProjectChanges, TaskChanges, TodoListManager};

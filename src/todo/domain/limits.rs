//! Quota and length limits applied by the manager and value constructors.

use serde::{Deserialize, Serialize};

/// Quotas and string-length caps for projects and tasks.
///
/// Lengths are measured in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoLimits {
    /// Maximum number of projects that may exist at once.
    pub max_projects: usize,
    /// Maximum number of tasks a single project may hold.
    pub max_tasks_per_project: usize,
    /// Maximum project name length.
    pub max_project_name_length: usize,
    /// Maximum project description length.
    pub max_project_description_length: usize,
    /// Maximum task title length.
    pub max_task_title_length: usize,
    /// Maximum task description length.
    pub max_task_description_length: usize,
}

impl Default for TodoLimits {
    fn default() -> Self {
        Self {
            max_projects: 5,
            max_tasks_per_project: 50,
            max_project_name_length: 30,
            max_project_description_length: 150,
            max_task_title_length: 30,
            max_task_description_length: 150,
        }
    }
}

impl TodoLimits {
    /// Returns a copy with a different project quota.
    #[must_use]
    pub const fn with_max_projects(mut self, max_projects: usize) -> Self {
        self.max_projects = max_projects;
        self
    }

    /// Returns a copy with a different per-project task quota.
    #[must_use]
    pub const fn with_max_tasks_per_project(mut self, max_tasks: usize) -> Self {
        self.max_tasks_per_project = max_tasks;
        self
    }
}

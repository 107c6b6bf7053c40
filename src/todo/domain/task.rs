//! Task aggregate and status lifecycle.

use super::{
    ParseTaskStatusError, ProjectId, TaskDescription, TaskId, TaskTitle, TodoDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Every status may move to every other status; the only coupled state is
/// the closed timestamp, which is present exactly while the task is
/// [`TaskStatus::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is in progress.
    Doing,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }

    /// Returns `true` for the terminal [`TaskStatus::Done`] status.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "DOING" => Ok(Self::Doing),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// A unit of work belonging to exactly one project.
///
/// Built only through [`Task::new`] or [`Task::from_persisted`], so the
/// closed timestamp is present exactly while the task is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: TaskDescription,
        deadline: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            status: TaskStatus::Todo,
            deadline,
            created_at: clock.utc(),
            closed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::ClosedTimestampMismatch`] when the stored
    /// closed timestamp disagrees with the stored status.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TodoDomainError> {
        if data.status.is_done() != data.closed_at.is_some() {
            return Err(TodoDomainError::ClosedTimestampMismatch(data.id));
        }
        Ok(Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            closed_at: data.closed_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp; present only while done.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns `true` when the deadline has passed and the task is not done.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_done() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Moves the task to `new_status`, keeping the closed timestamp in step.
    ///
    /// Entering [`TaskStatus::Done`] stamps the closed timestamp unless one is
    /// already present, so repeating the transition leaves it untouched.
    /// Any other status clears it.
    pub fn update_status(&mut self, new_status: TaskStatus, clock: &impl Clock) {
        if new_status.is_done() {
            if self.closed_at.is_none() {
                self.closed_at = Some(clock.utc());
            }
        } else {
            self.closed_at = None;
        }
        self.status = new_status;
    }

    /// Overwrites title, description and deadline with whichever values are
    /// given. An absent deadline leaves the current one in place.
    pub fn update_details(
        &mut self,
        title: Option<TaskTitle>,
        description: Option<TaskDescription>,
        deadline: Option<DateTime<Utc>>,
    ) {
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_deadline) = deadline {
            self.deadline = Some(new_deadline);
        }
    }
}

//! Project aggregate.

use super::{ProjectDescription, ProjectId, ProjectName};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: ProjectDescription,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted display name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: ProjectDescription,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project stamped with the current clock time.
    #[must_use]
    pub fn new(name: ProjectName, description: ProjectDescription, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrites the name and description with whichever values are given.
    pub fn update_details(
        &mut self,
        name: Option<ProjectName>,
        description: Option<ProjectDescription>,
    ) {
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
    }
}

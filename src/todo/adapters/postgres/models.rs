//! Diesel row models for project and task persistence.

use super::schema::{projects, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub name: String,
    /// Description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

//! `PostgreSQL` adapters for project and task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTodoRepository, SCHEMA_SQL, TodoPgPool, apply_schema, connect};

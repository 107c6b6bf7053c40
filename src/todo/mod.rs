//! Project and task management.
//!
//! Projects own tasks; the manager in [`services`] enforces creation quotas,
//! case-insensitive project name uniqueness, and the task status lifecycle,
//! while [`services::autoclose_overdue_tasks`] reconciles overdue work. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;

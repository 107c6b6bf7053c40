//! Todolist: project and task tracking with quotas and overdue auto-close.
//!
//! Projects group tasks; a manager enforces project and task quotas,
//! case-insensitive project name uniqueness, and the task status lifecycle
//! in which a task carries a closed timestamp exactly while it is done. A
//! periodic job closes overdue tasks.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`todo`]: Domain, ports, adapters and services for projects and tasks
//! - [`scheduler`]: Periodic driver for the auto-close job
//! - [`api`]: HTTP surface
//! - [`config`]: Environment configuration
//! - [`runtime`]: Tracing, database and shutdown bootstrap for the binaries

pub mod api;
pub mod config;
pub mod runtime;
pub mod scheduler;
pub mod todo;

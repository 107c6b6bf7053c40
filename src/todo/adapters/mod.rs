//! Adapter implementations for project and task ports.

pub mod memory;
pub mod postgres;

//! In-memory adapters for project and task persistence.

mod store;

pub use store::InMemoryTodoStore;

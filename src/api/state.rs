//! Shared state handed to every handler.

use crate::todo::{
    domain::TodoLimits,
    ports::{ProjectRepository, TaskRepository},
    services::TodoListManager,
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Manager type served over HTTP, independent of the storage backend.
pub type SharedTodoManager =
    TodoListManager<dyn ProjectRepository, dyn TaskRepository, DefaultClock>;

/// Shared application state available to handlers via `State<AppState>`.
///
/// Cheap to clone; everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Business-rule engine for projects and tasks.
    pub manager: Arc<SharedTodoManager>,
    /// Clock used for request-level checks such as deadline validation.
    pub clock: Arc<DefaultClock>,
}

impl AppState {
    /// Builds state over separate project and task repositories.
    #[must_use]
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        tasks: Arc<dyn TaskRepository>,
        limits: TodoLimits,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        let manager = TodoListManager::new(projects, tasks, Arc::clone(&clock), limits);
        Self {
            manager: Arc::new(manager),
            clock,
        }
    }

    /// Builds state over a single store implementing both repositories.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, limits: TodoLimits) -> Self
    where
        S: ProjectRepository + TaskRepository + 'static,
    {
        let projects: Arc<dyn ProjectRepository> = Arc::clone(&store) as _;
        Self::new(projects, store, limits)
    }
}

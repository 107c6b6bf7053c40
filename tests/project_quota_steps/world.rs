//! Shared world state for project quota BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use todolist::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{Project, TodoLimits},
    services::{TodoListManager, TodoServiceError},
};

/// Manager type used by the BDD world.
pub type TestManager = TodoListManager<InMemoryTodoStore, InMemoryTodoStore, DefaultClock>;

/// Scenario world for project quota behaviour tests.
pub struct ProjectQuotaWorld {
    pub manager: TestManager,
    pub projects: HashMap<String, Project>,
    pub last_creation: Option<Result<Project, TodoServiceError>>,
}

impl ProjectQuotaWorld {
    /// Creates a world whose manager enforces `limits`.
    #[must_use]
    pub fn with_limits(limits: TodoLimits) -> Self {
        let store = Arc::new(InMemoryTodoStore::new());
        let manager =
            TodoListManager::new(Arc::clone(&store), store, Arc::new(DefaultClock), limits);

        Self {
            manager,
            projects: HashMap::new(),
            last_creation: None,
        }
    }
}

impl Default for ProjectQuotaWorld {
    fn default() -> Self {
        Self::with_limits(TodoLimits::default())
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectQuotaWorld {
    ProjectQuotaWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

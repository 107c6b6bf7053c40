//! Shared world state for auto-close BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use todolist::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{Project, Task, TodoLimits},
    services::TodoListManager,
};

/// Manager type used by the BDD world.
pub type TestManager = TodoListManager<InMemoryTodoStore, InMemoryTodoStore, DefaultClock>;

/// Scenario world for auto-close behaviour tests.
pub struct AutocloseWorld {
    pub store: Arc<InMemoryTodoStore>,
    pub manager: TestManager,
    pub project: Option<Project>,
    pub tasks: HashMap<String, Task>,
    pub last_closed: Option<usize>,
}

impl AutocloseWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTodoStore::new());
        let manager = TodoListManager::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::new(DefaultClock),
            TodoLimits::default(),
        );

        Self {
            store,
            manager,
            project: None,
            tasks: HashMap::new(),
            last_closed: None,
        }
    }

    /// Returns the task remembered under `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no such task was created in the scenario.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.tasks
            .get(title)
            .ok_or_else(|| eyre::eyre!("missing task '{title}' in scenario world"))
    }
}

impl Default for AutocloseWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AutocloseWorld {
    AutocloseWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

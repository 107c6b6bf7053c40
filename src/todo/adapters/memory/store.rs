//! In-memory store backing both repository ports.
//!
//! Projects and tasks share one lock so that deleting a project removes its
//! tasks atomically, mirroring a cascading foreign key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{
        Project, ProjectDescription, ProjectId, ProjectName, Task, TaskDescription, TaskId,
        TaskTitle,
    },
    ports::{
        ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory project and task store.
///
/// Clones share the same underlying state.
pub struct InMemoryTodoStore<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTodoState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTodoStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTodoStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTodoStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Stored value tagged with its insertion sequence for stable ordering.
#[derive(Debug)]
struct Entry<T> {
    sequence: u64,
    value: T,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    next_sequence: u64,
    projects: HashMap<ProjectId, Entry<Project>>,
    tasks: HashMap<TaskId, Entry<Task>>,
}

impl InMemoryTodoState {
    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn name_taken(&self, name: &ProjectName, except: Option<ProjectId>) -> bool {
        self.projects.values().any(|entry| {
            Some(entry.value.id()) != except && entry.value.name().eq_ignore_case(name)
        })
    }
}

impl InMemoryTodoStore<DefaultClock> {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTodoStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping entities with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTodoState::default())),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryTodoState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryTodoState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

/// Collects entry values ordered by creation time, then insertion order.
fn ordered<'a, T, I>(entries: I, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a Entry<T>>,
{
    let mut selected: Vec<&Entry<T>> = entries.collect();
    selected.sort_by_key(|entry| (created_at(&entry.value), entry.sequence));
    selected.into_iter().map(|entry| entry.value.clone()).collect()
}

#[async_trait]
impl<C> ProjectRepository for InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(
        &self,
        name: &ProjectName,
        description: &ProjectDescription,
    ) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.name_taken(name, None) {
            return Err(ProjectRepositoryError::DuplicateName(name.to_string()));
        }

        let project = Project::new(name.clone(), description.clone(), &*self.clock);
        let sequence = state.next_sequence();
        state.projects.insert(
            project.id(),
            Entry {
                sequence,
                value: project.clone(),
            },
        );
        Ok(project)
    }

    async fn get_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).map(|entry| entry.value.clone()))
    }

    async fn get_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let folded = name.trim().to_lowercase();
        Ok(state
            .projects
            .values()
            .find(|entry| entry.value.name().folded() == folded)
            .map(|entry| entry.value.clone()))
    }

    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(ordered(state.projects.values(), Project::created_at))
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        }
        if state.name_taken(project.name(), Some(project.id())) {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().to_string(),
            ));
        }

        if let Some(entry) = state.projects.get_mut(&project.id()) {
            entry.value = project.clone();
        }
        Ok(project.clone())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }
        state.tasks.retain(|_, entry| entry.value.project_id() != id);
        Ok(true)
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.len())
    }
}

#[async_trait]
impl<C> TaskRepository for InMemoryTodoStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(
        &self,
        project_id: ProjectId,
        title: &TaskTitle,
        description: &TaskDescription,
        deadline: Option<DateTime<Utc>>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.projects.contains_key(&project_id) {
            return Err(TaskRepositoryError::ProjectNotFound(project_id));
        }

        let task = Task::new(
            project_id,
            title.clone(),
            description.clone(),
            deadline,
            &*self.clock,
        );
        let sequence = state.next_sequence();
        state.tasks.insert(
            task.id(),
            Entry {
                sequence,
                value: task.clone(),
            },
        );
        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).map(|entry| entry.value.clone()))
    }

    async fn get_by_project_id(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let tasks = state
            .tasks
            .values()
            .filter(|entry| entry.value.project_id() == project_id);
        Ok(ordered(tasks, Task::created_at))
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let entry = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        entry.value = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|entry| entry.value.project_id() == project_id)
            .count())
    }

    async fn get_overdue_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let now = self.clock.utc();
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|entry| entry.value.is_overdue_at(now))
            .map(|entry| entry.value.clone())
            .collect())
    }
}

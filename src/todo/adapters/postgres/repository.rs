//! `PostgreSQL` repository implementation for projects and tasks.

use super::{
    models::{NewProjectRow, NewTaskRow, ProjectRow, TaskRow},
    schema::{projects, tasks},
};
use crate::todo::{
    domain::{
        PersistedProjectData, PersistedTaskData, Project, ProjectDescription, ProjectId,
        ProjectName, Task, TaskDescription, TaskId, TaskStatus, TaskTitle,
    },
    ports::{
        ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied by [`apply_schema`]; every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_projects_and_tasks/up.sql");

const PROJECT_NAME_UNIQUE_INDEX: &str = "idx_projects_name_lower_unique";

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn connect(database_url: &str) -> Result<TodoPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().build(manager)
}

/// Creates the `projects` and `tasks` tables when they are missing.
///
/// This is a blocking operation.
///
/// # Errors
///
/// Returns [`ProjectRepositoryError::Persistence`] when a connection cannot
/// be obtained or the schema statements fail.
pub fn apply_schema(pool: &TodoPgPool) -> ProjectRepositoryResult<()> {
    let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
    connection
        .batch_execute(SCHEMA_SQL)
        .map_err(ProjectRepositoryError::persistence)
}

/// Errors that can wrap an arbitrary persistence failure.
trait PersistenceFailure: Send + 'static {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for ProjectRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed project and task repository.
///
/// Identities and timestamps are generated in the application using the
/// injected clock, which also defines "now" for overdue scans.
pub struct PostgresTodoRepository<C = DefaultClock> {
    pool: TodoPgPool,
    clock: Arc<C>,
}

impl<C> Clone for PostgresTodoRepository<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl PostgresTodoRepository<DefaultClock> {
    /// Creates a repository from a connection pool using the system clock.
    #[must_use]
    pub fn new(pool: TodoPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> PostgresTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a repository from a connection pool and clock.
    #[must_use]
    pub const fn with_clock(pool: TodoPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_failure)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_failure)?
    }
}

#[async_trait]
impl<C> ProjectRepository for PostgresTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(
        &self,
        name: &ProjectName,
        description: &ProjectDescription,
    ) -> ProjectRepositoryResult<Project> {
        let project = Project::new(name.clone(), description.clone(), &*self.clock);
        let new_row = NewProjectRow {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            created_at: project.created_at(),
        };

        self.run_blocking(move |connection| {
            // The unique index remains the source of truth; the pre-check
            // only yields a clearer error before the insert is attempted.
            if find_project_by_name(connection, &new_row.name, None)?.is_some() {
                return Err(ProjectRepositoryError::DuplicateName(new_row.name.clone()));
            }

            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_project_write_error(err, &new_row.name))?;
            Ok(())
        })
        .await?;

        Ok(project)
    }

    async fn get_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn get_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>> {
        let lookup = name.trim().to_owned();
        self.run_blocking(move |connection| {
            Ok(find_project_by_name(connection, &lookup, None)?.map(row_to_project))
        })
        .await
    }

    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order_by((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project> {
        let project_id = project.id();
        let name = project.name().as_str().to_owned();
        let description = project.description().as_str().to_owned();

        self.run_blocking(move |connection| {
            if find_project_by_name(connection, &name, Some(project_id))?.is_some() {
                return Err(ProjectRepositoryError::DuplicateName(name.clone()));
            }

            let updated_count =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set((
                        projects::name.eq(&name),
                        projects::description.eq(&description),
                    ))
                    .execute(connection)
                    .map_err(|err| map_project_write_error(err, &name))?;

            if updated_count == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await?;

        Ok(project.clone())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            usize::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl<C> TaskRepository for PostgresTodoRepository<C>
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
        let task = Task::new(
            project_id,
            title.clone(),
            description.clone(),
            deadline,
            &*self.clock,
        );
        let new_row = to_new_task_row(&task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ProjectNotFound(project_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await?;

        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn get_by_project_id(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order_by((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::title.eq(&row.title),
                        tasks::description.eq(&row.description),
                        tasks::status.eq(&row.status),
                        tasks::deadline.eq(row.deadline),
                        tasks::closed_at.eq(row.closed_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await?;

        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            usize::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn get_overdue_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let now = self.clock.utc();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deadline.is_not_null())
                .filter(tasks::deadline.lt(now))
                .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn find_project_by_name(
    connection: &mut PgConnection,
    name: &str,
    excluding: Option<ProjectId>,
) -> ProjectRepositoryResult<Option<ProjectRow>> {
    let query = diesel::sql_query(concat!(
        "SELECT id, name, description, created_at FROM projects ",
        "WHERE lower(name) = lower($1) ",
        "AND ($2::UUID IS NULL OR id <> $2) ",
        "LIMIT 1",
    ))
    .bind::<diesel::sql_types::Text, _>(name)
    .bind::<diesel::sql_types::Nullable<diesel::sql_types::Uuid>, _>(
        excluding.map(ProjectId::into_inner),
    );

    query
        .get_result::<ProjectRow>(connection)
        .optional()
        .map_err(ProjectRepositoryError::persistence)
}

fn map_project_write_error(err: DieselError, name: &str) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_unique_violation(info.as_ref()) =>
        {
            ProjectRepositoryError::DuplicateName(name.to_owned())
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == PROJECT_NAME_UNIQUE_INDEX)
}

fn row_to_project(row: ProjectRow) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: ProjectName::from_persisted(row.name),
        description: ProjectDescription::from_persisted(row.description),
        created_at: row.created_at,
    })
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline(),
        created_at: task.created_at(),
        closed_at: task.closed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status: persisted_status,
        deadline,
        created_at,
        closed_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: TaskTitle::from_persisted(title),
        description: TaskDescription::from_persisted(description),
        status,
        deadline,
        created_at,
        closed_at,
    })
    .map_err(TaskRepositoryError::persistence)
}

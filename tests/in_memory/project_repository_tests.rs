//! Project repository contract tests against the in-memory store.

use super::helpers::{add_project, add_task, store};
use rstest::rstest;
use todolist::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{ProjectDescription, ProjectId, ProjectName, TodoLimits},
    ports::{ProjectRepository, ProjectRepositoryError, TaskRepository},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_identity_and_timestamp(store: InMemoryTodoStore) -> eyre::Result<()> {
    let first = add_project(&store, "Alpha").await?;
    let second = add_project(&store, "Beta").await?;

    eyre::ensure!(first.id() != second.id(), "project ids must be unique");
    eyre::ensure!(
        first.created_at() <= second.created_at(),
        "creation timestamps must not go backwards"
    );
    eyre::ensure!(ProjectRepository::count(&store).await? == 2, "expected two projects");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_are_rejected_ignoring_case(store: InMemoryTodoStore) -> eyre::Result<()> {
    add_project(&store, "Reading").await?;
    let limits = TodoLimits::default();

    let result = ProjectRepository::create(
        &store,
        &ProjectName::new("READING", &limits)?,
        &ProjectDescription::new("", &limits)?,
    )
    .await;

    eyre::ensure!(
        matches!(result, Err(ProjectRepositoryError::DuplicateName(_))),
        "expected DuplicateName, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_name_ignores_case(store: InMemoryTodoStore) -> eyre::Result<()> {
    let created = add_project(&store, "Travel").await?;

    let found = store.get_by_name("tRAVEL").await?;

    eyre::ensure!(found == Some(created), "lookup by name should ignore case");
    eyre::ensure!(
        store.get_by_name("Travelling").await?.is_none(),
        "lookup by name should match whole names"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_all_orders_by_creation(store: InMemoryTodoStore) -> eyre::Result<()> {
    let mut created = Vec::new();
    for name in ["Third", "First", "Second"] {
        created.push(add_project(&store, name).await?);
    }

    let listed = store.get_all().await?;

    eyre::ensure!(listed == created, "projects should be listed in creation order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_missing_project(store: InMemoryTodoStore) -> eyre::Result<()> {
    let detached = add_project(&InMemoryTodoStore::new(), "Detached").await?;

    let result = ProjectRepository::update(&store, &detached).await;

    eyre::ensure!(
        matches!(result, Err(ProjectRepositoryError::NotFound(id)) if id == detached.id()),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_tasks(store: InMemoryTodoStore) -> eyre::Result<()> {
    let doomed = add_project(&store, "Doomed").await?;
    let survivor = add_project(&store, "Survivor").await?;
    let lost = add_task(&store, doomed.id(), "Lost", None).await?;
    let kept = add_task(&store, survivor.id(), "Kept", None).await?;

    eyre::ensure!(ProjectRepository::delete(&store, doomed.id()).await?, "delete should report removal");

    eyre::ensure!(
        TaskRepository::get_by_id(&store, lost.id()).await?.is_none(),
        "tasks of a deleted project must be removed"
    );
    eyre::ensure!(
        TaskRepository::get_by_id(&store, kept.id()).await?.is_some(),
        "tasks of other projects must survive"
    );
    eyre::ensure!(
        !ProjectRepository::delete(&store, ProjectId::new()).await?,
        "deleting a missing project should report false"
    );
    Ok(())
}

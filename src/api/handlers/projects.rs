//! Handlers for the `/projects` resource.

use crate::api::{
    error::{ApiError, ApiResult},
    response::{ApiResponse, ProjectView},
    state::AppState,
};
use crate::todo::{
    domain::ProjectId,
    services::{ProjectChanges, TodoServiceError},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

/// Body of `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    /// Project name.
    pub name: String,
    /// Optional description, empty when omitted.
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /projects/{id}`; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectBody {
    /// New project name.
    pub name: Option<String>,
    /// New project description.
    pub description: Option<String>,
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<ProjectView>>>> {
    let projects = state.manager.list_all_projects().await?;
    let mut views = Vec::with_capacity(projects.len());
    for project in &projects {
        let task_count = state.manager.count_project_tasks(project.id()).await?;
        views.push(ProjectView::with_task_count(project, task_count));
    }
    Ok(Json(ApiResponse::ok(views)))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProjectView>>)> {
    let Json(input) = body?;
    let project = state
        .manager
        .create_project(input.name, input.description)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ProjectView::with_task_count(&project, 0))),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<ProjectView>>> {
    let Path(project_id) = path?;
    let project = state
        .manager
        .get_project(project_id)
        .await?
        .ok_or(TodoServiceError::ProjectNotFound(project_id))?;
    let task_count = state.manager.count_project_tasks(project_id).await?;
    Ok(Json(ApiResponse::ok(ProjectView::with_task_count(
        &project, task_count,
    ))))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<ProjectId>, PathRejection>,
    body: Result<Json<UpdateProjectBody>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ProjectView>>> {
    let Path(project_id) = path?;
    let Json(input) = body?;

    let mut changes = ProjectChanges::new();
    if let Some(name) = input.name {
        changes = changes.with_name(name);
    }
    if let Some(description) = input.description {
        changes = changes.with_description(description);
    }

    let project = state.manager.edit_project(project_id, changes).await?;
    Ok(Json(ApiResponse::ok(ProjectView::from(&project))))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(project_id) = path?;
    if state.manager.delete_project(project_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from(TodoServiceError::ProjectNotFound(project_id)))
    }
}

//! Handlers for tasks nested under `/projects/{project_id}/tasks`.

use crate::api::{
    error::{ApiError, ApiResult},
    response::{ApiResponse, TaskView},
    state::AppState,
};
use crate::todo::{
    domain::{ProjectId, Task, TaskId, TaskStatus},
    services::{AddTaskRequest, TaskChanges, TodoServiceError},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;

/// Body of `POST /projects/{project_id}/tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: String,
    /// Optional description, empty when omitted.
    #[serde(default)]
    pub description: String,
    /// Optional deadline; must not lie in the past.
    pub deadline: Option<DateTime<Utc>>,
}

/// Body of `PUT /projects/{project_id}/tasks/{task_id}`; omitted fields are
/// left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// New status, case-insensitive.
    pub status: Option<String>,
}

/// Body of `PATCH /projects/{project_id}/tasks/{task_id}/status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusBody {
    /// Target status, case-insensitive.
    pub status: String,
}

/// Path of a single task.
type TaskPath = Path<(ProjectId, TaskId)>;

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<Vec<TaskView>>>> {
    let Path(project_id) = path?;
    let tasks = state.manager.list_project_tasks(project_id).await?;
    Ok(Json(ApiResponse::ok(
        tasks.iter().map(TaskView::from).collect(),
    )))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    path: Result<Path<ProjectId>, PathRejection>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TaskView>>)> {
    let Path(project_id) = path?;
    let Json(input) = body?;

    if input
        .deadline
        .is_some_and(|deadline| deadline < state.clock.utc())
    {
        return Err(ApiError::Validation(
            "deadline cannot be in the past".to_owned(),
        ));
    }

    let request = AddTaskRequest::new(project_id, input.title)
        .with_description(input.description)
        .with_optional_deadline(input.deadline);
    let task = state.manager.add_task_to_project(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TaskView::from(&task))),
    ))
}

/// GET /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<TaskPath, PathRejection>,
) -> ApiResult<Json<ApiResponse<TaskView>>> {
    let Path((project_id, task_id)) = path?;
    let task = require_task(&state, project_id, task_id).await?;
    Ok(Json(ApiResponse::ok(TaskView::from(&task))))
}

/// PUT /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn update(
    State(state): State<AppState>,
    path: Result<TaskPath, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TaskView>>> {
    let Path((project_id, task_id)) = path?;
    let Json(input) = body?;

    let mut changes = TaskChanges::new();
    if let Some(title) = input.title {
        changes = changes.with_title(title);
    }
    if let Some(description) = input.description {
        changes = changes.with_description(description);
    }
    if let Some(deadline) = input.deadline {
        changes = changes.with_deadline(deadline);
    }
    if let Some(status) = input.status {
        changes = changes.with_status(parse_status(&status)?);
    }

    require_task(&state, project_id, task_id).await?;
    let task = state.manager.edit_task(task_id, changes).await?;
    Ok(Json(ApiResponse::ok(TaskView::from(&task))))
}

/// PATCH /api/v1/projects/{project_id}/tasks/{task_id}/status
pub async fn change_status(
    State(state): State<AppState>,
    path: Result<TaskPath, PathRejection>,
    body: Result<Json<ChangeStatusBody>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TaskView>>> {
    let Path((project_id, task_id)) = path?;
    let Json(input) = body?;
    let status = parse_status(&input.status)?;

    require_task(&state, project_id, task_id).await?;
    let task = state.manager.change_task_status(task_id, status).await?;
    Ok(Json(ApiResponse::ok(TaskView::from(&task))))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn delete(
    State(state): State<AppState>,
    path: Result<TaskPath, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((project_id, task_id)) = path?;
    require_task(&state, project_id, task_id).await?;
    if state.manager.delete_task(task_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from(TodoServiceError::TaskNotFound(task_id)))
    }
}

async fn require_task(state: &AppState, project_id: ProjectId, task_id: TaskId) -> ApiResult<Task> {
    let task = state
        .manager
        .get_task(Some(project_id), task_id)
        .await?
        .ok_or(TodoServiceError::TaskNotFound(task_id))?;
    Ok(task)
}

fn parse_status(raw: &str) -> ApiResult<TaskStatus> {
    TaskStatus::try_from(raw).map_err(|err| ApiError::Validation(err.to_string()))
}

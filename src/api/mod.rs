//! HTTP surface for projects and tasks.
//!
//! [`build_router`] assembles the `/api/v1` routes with request tracing so
//! the binary and the integration tests serve the same stack.

pub mod error;
pub mod handlers;
pub mod response;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use response::{ApiResponse, ProjectView, TaskView};
pub use state::{AppState, SharedTodoManager};

use axum::{
    Router,
    routing::{get, patch},
};
use handlers::{health, projects, tasks};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Builds the application router with all routes and middleware.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{project_id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/projects/{project_id}/tasks",
            get(tasks::list).post(tasks::create),
        )
        .route(
            "/projects/{project_id}/tasks/{task_id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .delete(tasks::delete),
        )
        .route(
            "/projects/{project_id}/tasks/{task_id}/status",
            patch(tasks::change_status),
        )
}

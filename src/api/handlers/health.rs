//! Liveness probe.

use crate::api::response::{ApiResponse, HealthView};
use axum::Json;

/// GET /api/v1/health
pub async fn health_check() -> Json<ApiResponse<HealthView>> {
    Json(ApiResponse::ok(HealthView {
        status: "healthy",
        message: "ToDoList API is running",
    }))
}

//! HTTP server exposing the project and task API.
//!
//! Reads configuration from the environment (and `.env` when present),
//! connects to `PostgreSQL` via `DATABASE_URL` and serves `/api/v1` until
//! Ctrl-C.

use std::sync::Arc;
use todolist::{
    api::{AppState, build_router},
    config::AppConfig,
    runtime::{init_tracing, open_repository, shutdown_signal},
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    init_tracing();
    tracing::debug!(dotenv_loaded, "environment loaded");

    let config = AppConfig::from_env()?;
    let repository = Arc::new(open_repository(&config).await?);
    let app = build_router(AppState::from_store(repository, config.limits));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "todolist api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("todolist api stopped");
    Ok(())
}

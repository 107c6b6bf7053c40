//! Process bootstrap shared by the binaries.

use crate::{
    config::{AppConfig, ConfigError},
    todo::adapters::postgres::{PostgresTodoRepository, apply_schema, connect},
};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "todolist=info,tower_http=info";

/// Errors raised while bootstrapping a binary.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connection pool could not be built.
    #[error("failed to connect to database: {0}")]
    Connect(#[from] diesel::r2d2::PoolError),

    /// The schema could not be applied.
    #[error("failed to apply database schema: {0}")]
    Schema(String),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to `PostgreSQL`, applies the schema and returns a repository.
///
/// # Errors
///
/// Returns [`StartupError`] when `DATABASE_URL` is missing, the pool cannot
/// connect or the schema cannot be applied.
pub async fn open_repository(config: &AppConfig) -> Result<PostgresTodoRepository, StartupError> {
    let database_url = config.require_database_url()?.to_owned();
    let pool = tokio::task::spawn_blocking(move || {
        let connected = connect(&database_url)?;
        apply_schema(&connected).map_err(|err| StartupError::Schema(err.to_string()))?;
        Ok::<_, StartupError>(connected)
    })
    .await
    .map_err(|err| StartupError::Schema(err.to_string()))??;
    tracing::info!("database ready");
    Ok(PostgresTodoRepository::new(pool))
}

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "failed to listen for shutdown signal"),
    }
}

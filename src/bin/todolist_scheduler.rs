//! Periodically closes overdue tasks.
//!
//! Usage:
//!
//! ```text
//! todolist-scheduler [--once]
//! ```
//!
//! Without arguments the job runs every `AUTOCLOSE_INTERVAL_MINUTES` until
//! Ctrl-C. `--once` runs a single pass and exits, failing when the pass
//! fails.

use mockable::DefaultClock;
use std::{env, sync::Arc};
use thiserror::Error;
use todolist::{
    config::AppConfig,
    runtime::{init_tracing, open_repository, shutdown_signal},
    scheduler::AutocloseScheduler,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SchedulerCliError {
    #[error("unrecognised argument '{0}'; usage: todolist-scheduler [--once]")]
    InvalidArgs(String),
    #[error("auto-close run failed")]
    RunFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Forever,
    Once,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Mode, SchedulerCliError> {
    let mut mode = Mode::Forever;
    for arg in args {
        match arg.as_str() {
            "--once" => mode = Mode::Once,
            _ => return Err(SchedulerCliError::InvalidArgs(arg)),
        }
    }
    Ok(mode)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    init_tracing();
    tracing::debug!(dotenv_loaded, "environment loaded");

    let mode = parse_args(env::args().skip(1))?;
    let config = AppConfig::from_env()?;
    let repository = Arc::new(open_repository(&config).await?);
    let scheduler =
        AutocloseScheduler::new(repository, Arc::new(DefaultClock), config.autoclose_interval);

    match mode {
        Mode::Once => {
            let closed = scheduler.run_once().await.ok_or(SchedulerCliError::RunFailed)?;
            tracing::info!(closed, "single auto-close pass finished");
        }
        Mode::Forever => {
            let runs = scheduler.run_until(shutdown_signal()).await;
            tracing::info!(runs, "auto-close scheduler stopped");
        }
    }
    Ok(())
}

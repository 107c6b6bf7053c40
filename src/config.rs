//! Process configuration loaded from environment variables.

use crate::todo::domain::TodoLimits;
use std::{str::FromStr, time::Duration};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_AUTOCLOSE_INTERVAL_MINUTES: u64 = 15;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },

    /// A required variable is absent.
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Runtime configuration for the API server and the scheduler.
///
/// | Env Var                          | Default   |
/// |----------------------------------|-----------|
/// | `MAX_NUMBER_OF_PROJECTS`         | `5`       |
/// | `MAX_NUMBER_OF_TASKS`            | `50`      |
/// | `MAX_PROJECT_NAME_LENGTH`        | `30`      |
/// | `MAX_PROJECT_DESCRIPTION_LENGTH` | `150`     |
/// | `MAX_TASK_TITLE_LENGTH`          | `30`      |
/// | `MAX_TASK_DESCRIPTION_LENGTH`    | `150`     |
/// | `AUTOCLOSE_INTERVAL_MINUTES`     | `15`      |
/// | `DATABASE_URL`                   | unset     |
/// | `HOST`                           | `0.0.0.0` |
/// | `PORT`                           | `8000`    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Quotas and length caps injected into the manager.
    pub limits: TodoLimits,
    /// Period between auto-close runs.
    pub autoclose_interval: Duration,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: TodoLimits::default(),
            autoclose_interval: minutes(DEFAULT_AUTOCLOSE_INTERVAL_MINUTES),
            database_url: None,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = TodoLimits::default();
        let limits = TodoLimits {
            max_projects: parse_or(&lookup, "MAX_NUMBER_OF_PROJECTS", defaults.max_projects)?,
            max_tasks_per_project: parse_or(
                &lookup,
                "MAX_NUMBER_OF_TASKS",
                defaults.max_tasks_per_project,
            )?,
            max_project_name_length: parse_or(
                &lookup,
                "MAX_PROJECT_NAME_LENGTH",
                defaults.max_project_name_length,
            )?,
            max_project_description_length: parse_or(
                &lookup,
                "MAX_PROJECT_DESCRIPTION_LENGTH",
                defaults.max_project_description_length,
            )?,
            max_task_title_length: parse_or(
                &lookup,
                "MAX_TASK_TITLE_LENGTH",
                defaults.max_task_title_length,
            )?,
            max_task_description_length: parse_or(
                &lookup,
                "MAX_TASK_DESCRIPTION_LENGTH",
                defaults.max_task_description_length,
            )?,
        };

        let interval_minutes = parse_or(
            &lookup,
            "AUTOCLOSE_INTERVAL_MINUTES",
            DEFAULT_AUTOCLOSE_INTERVAL_MINUTES,
        )?;
        if interval_minutes == 0 {
            return Err(ConfigError::Invalid {
                name: "AUTOCLOSE_INTERVAL_MINUTES",
                value: interval_minutes.to_string(),
                expected: "a positive number of minutes",
            });
        }

        Ok(Self {
            limits,
            autoclose_interval: minutes(interval_minutes),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    /// Returns the database URL or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
            expected: "a non-negative integer",
        }),
    }
}

const fn minutes(count: u64) -> Duration {
    Duration::from_secs(count.saturating_mul(60))
}

//! Application assembly.
//!
//! Builds the configured storage backend, the task board service, and the
//! router. Both the native server and the serverless entry point start here.

use std::sync::Arc;

use axum::Router;
use mockable::DefaultClock;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError, StorageConfig};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::adapters::postgres::PostgresTaskRepository;
use crate::task::ports::TaskRepository;
use crate::task::services::TaskBoardService;
use crate::web::router;
use crate::web::state::AppState;
use crate::web::templates::TemplateEngine;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum InitError {
    /// The environment configuration is invalid.
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// An embedded template failed to parse.
    #[error("template error")]
    Template(#[from] minijinja::Error),

    /// The database connection pool could not be built.
    #[error("database connection error")]
    Database(#[from] diesel::r2d2::PoolError),
}

/// Builds the router for the given configuration.
///
/// # Errors
///
/// Returns [`InitError`] when the templates fail to parse or the configured
/// database is unreachable.
pub fn build(config: &AppConfig) -> Result<Router, InitError> {
    let repository: Arc<dyn TaskRepository> = match &config.storage {
        StorageConfig::Memory => {
            tracing::info!("using in-memory task storage");
            Arc::new(InMemoryTaskRepository::new())
        }
        StorageConfig::Postgres { database_url } => {
            tracing::info!("using PostgreSQL task storage");
            Arc::new(PostgresTaskRepository::connect(database_url)?)
        }
    };
    let service = TaskBoardService::new(repository, Arc::new(DefaultClock));
    let templates = Arc::new(TemplateEngine::new()?);
    Ok(router::build(AppState::new(service, templates)))
}

/// Reads configuration from the environment and builds the router.
///
/// # Errors
///
/// Returns [`InitError`] when the environment is invalid or assembly fails.
pub fn build_from_env() -> Result<Router, InitError> {
    let config = AppConfig::from_env()?;
    build(&config)
}

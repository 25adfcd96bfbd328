//! Environment-driven application configuration.
//!
//! # Environment variables
//!
//! - `HOST`: bind address for the native server (default `127.0.0.1`)
//! - `PORT`: bind port (default `3000`)
//! - `STORAGE_MODE`: `memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL, required when
//!   `STORAGE_MODE=postgres`
//! - `RUST_LOG`: tracing filter (e.g. `taskboard=debug,tower_http=debug`)

use std::env;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is not a valid TCP port number.
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),

    /// `STORAGE_MODE` names an unknown backend.
    #[error("unknown STORAGE_MODE '{0}', expected 'memory' or 'postgres'")]
    UnknownStorageMode(String),

    /// `STORAGE_MODE=postgres` without a connection URL.
    #[error("DATABASE_URL must be set when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// In-process store, lost on shutdown.
    Memory,
    /// `PostgreSQL` via the Diesel adapter.
    Postgres {
        /// Connection URL handed to the pool.
        database_url: String,
    },
}

/// Application configuration loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address for the native HTTP server.
    pub host: String,
    /// Bind port for the native HTTP server.
    pub port: u16,
    /// Storage backend.
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let port = match env::var("PORT") {
            Err(_) => 3000,
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        };
        let storage = match env::var("STORAGE_MODE").as_deref() {
            Err(_) | Ok("memory") => StorageConfig::Memory,
            Ok("postgres") => {
                let database_url =
                    env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
                StorageConfig::Postgres { database_url }
            }
            Ok(other) => return Err(ConfigError::UnknownStorageMode(other.to_owned())),
        };
        Ok(Self {
            host,
            port,
            storage,
        })
    }

    /// Returns the `host:port` bind address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

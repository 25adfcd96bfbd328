//! Native HTTP server entry point.

use taskboard::app::{self, InitError};
use taskboard::config::AppConfig;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors that abort server startup.
#[derive(Debug, Error)]
enum ServeError {
    /// The application could not be assembled.
    #[error(transparent)]
    Init(#[from] InitError),

    /// Binding or serving the listener failed.
    #[error("server error")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskboard=debug,tower_http=debug")),
        )
        .with(fmt::layer())
        .init();

    let config = AppConfig::from_env().map_err(InitError::from)?;
    let router = app::build(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    // Serve until interrupted; a failed signal hook falls through to serve
    // forever rather than aborting startup.
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install shutdown signal handler");
        std::future::pending::<()>().await;
    }
}

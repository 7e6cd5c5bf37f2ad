//! IncidentHub notification server.
//!
//! Loads configuration, wires the notification engine to its collaborators,
//! and runs the dispatch loop until Ctrl+C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use incidenthub_core::config::AppConfig;
use incidenthub_core::error::AppError;
use incidenthub_notify::NotificationEngine;
use incidenthub_notify::delivery;
use incidenthub_notify::directory::memory::InMemoryUserDirectory;

/// Upper bound on the final flush after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("INCIDENTHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
        .map_err(|e| AppError::configuration(format!("Config load error (env: {env}): {e}")))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Wire the engine and run until shutdown
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting IncidentHub notification server");

    let directory = Arc::new(InMemoryUserDirectory::from_config(&config.directory));
    tracing::info!("User directory seeded with {} users", directory.len());

    let channel = delivery::from_config(&config.smtp)?;
    tracing::info!("Delivery channel: {}", channel.channel_type());

    let engine = NotificationEngine::new(&config.notifications, directory, channel);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let dispatcher_handle = engine.start(shutdown_rx);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, flushing pending notifications...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(SHUTDOWN_GRACE, dispatcher_handle).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(AppError::internal(format!("Dispatcher task failed: {e}")));
        }
        Err(_) => {
            tracing::warn!(
                "Dispatcher did not finish within {}s, {} notifications dropped",
                SHUTDOWN_GRACE.as_secs(),
                engine.pending()
            );
        }
    }

    let metrics = engine.metrics();
    tracing::info!(
        "IncidentHub notification server stopped (enqueued={}, sent={}, failed={})",
        metrics.enqueued,
        metrics.sent,
        metrics.failed
    );
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Meowtrics Server - Binary Entry Point
//!
//! Loads configuration, starts logging and serves the HTTP API until
//! Ctrl-C or SIGTERM, then drains in-flight requests for at most the
//! configured shutdown timeout.

use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use meowtrics::config::AppConfig;
use meowtrics::utils::init_logging;
use meowtrics::{create_router, AppState, EventStore, MemoryEventStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    if let Some(err) = init_logging(&config) {
        eprintln!("Error initializing logger, defaulting to stdout. Error: {}", err);
    }

    let store = Arc::new(MemoryEventStore::new());
    let state = Arc::new(AppState::new(store.clone()));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} {} listening on {}", meowtrics::NAME, meowtrics::VERSION, addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .into_future(),
    );

    shutdown_signal().await;
    info!(
        timeout_secs = config.shutdown_timeout.as_secs(),
        "Shutdown signal received, draining requests"
    );
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(Ok(Ok(()))) => info!("Server stopped"),
        Ok(Ok(Err(err))) => error!(cause = %err, "Server error during shutdown"),
        Ok(Err(err)) => error!(cause = %err, "Server task failed"),
        Err(_) => warn!("Shutdown timeout elapsed, dropping in-flight requests"),
    }

    info!("Starting clean up");
    if !store.is_empty() {
        info!(events = store.len(), "Discarding in-memory events");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(cause = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(cause = %err, "Failed to listen for SIGTERM");
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

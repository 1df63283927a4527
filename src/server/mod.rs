//! HTTP boundary for the coordinator.
//!
//! Request bodies are validated here, before anything reaches the registry
//! or the dispatcher: unknown tags, blank ids and malformed timestamps are
//! rejected with a `400` and the usual `{success: false, error}` envelope.

mod error;
mod handlers;
mod payloads;
mod router;
mod state;

pub use error::ApiError;
pub use payloads::{RegisterAdapterPayload, SubmitPacketPayload};
pub use router::router;
pub use state::{AppState, CoordinatorRegistry};

use crate::config::CoordinatorConfig;
use crate::storage::open_pool;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Opens storage, binds the listener and serves until Ctrl-C or `SIGTERM`.
///
/// The adapter registry is closed once the server has drained.
///
/// # Errors
///
/// Returns an error when the configuration is invalid, the database cannot
/// be opened or the listener cannot bind.
pub async fn run_server(config: CoordinatorConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    let addr = config.socket_addr()?;

    let pool = open_pool(&config.storage.database_path, config.storage.pool_size)
        .with_context(|| {
            format!(
                "failed to open database at {}",
                config.storage.database_path.display()
            )
        })?;
    info!(path = %config.storage.database_path.display(), "database ready");

    let state = AppState::from_pool(pool, &config);
    let sweeper = config
        .registry
        .heartbeat_timeout_secs
        .map(|timeout| spawn_heartbeat_sweeper(Arc::clone(&state.registry), &config, timeout));

    let app = router(state.clone(), config.server.enable_cors);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "MCP coordinator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    state.registry.close();
    if let Some(handle) = sweeper {
        handle.abort();
    }
    info!("MCP coordinator stopped");
    Ok(())
}

fn spawn_heartbeat_sweeper(
    registry: Arc<CoordinatorRegistry>,
    config: &CoordinatorConfig,
    timeout_secs: u64,
) -> tokio::task::JoinHandle<()> {
    let max_age = chrono::Duration::seconds(i64::try_from(timeout_secs).unwrap_or(i64::MAX));
    let period = Duration::from_secs(config.registry.sweep_interval_secs);
    info!(timeout_secs, "stale adapter eviction enabled");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(err) = registry.prune_stale(max_age) {
                warn!(error = %err, "stopping stale adapter sweep");
                break;
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
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
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

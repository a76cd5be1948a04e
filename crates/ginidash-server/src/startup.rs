//! Dashboard server startup helper.
//!
//! Provides [`spawn_dashboard`] which launches the HTTP + `WebSocket`
//! server on a background Tokio task. The application binary calls this
//! during startup so the server runs concurrently with the year
//! stepper.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError, start_server};
use crate::state::AppState;

/// Errors that can occur when spawning the dashboard server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the dashboard HTTP server on a background Tokio task.
///
/// Binds to `{host}:{port}` and serves the page, the figure API, and
/// the `WebSocket` year stream. Returns a [`JoinHandle`] so the caller
/// can manage the server's lifecycle alongside the stepper.
///
/// The server runs until the Tokio runtime is shut down or the task is
/// aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] for an address that cannot be
/// parsed; this is detected eagerly before the background task is
/// spawned.
pub async fn spawn_dashboard(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task. The actual bind happens inside start_server, but obvious
    // misconfigurations are caught early.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            tracing::error!(error = %e, "Dashboard server exited with error");
        }
    });

    tracing::info!(port, "Dashboard server spawned on background task");

    Ok(handle)
}

//! HTTP server lifecycle management.
//!
//! Provides [`start_server`], which binds to the configured address and
//! serves the router until `Ctrl-C` is received.

use std::net::SocketAddr;
use std::sync::Arc;

use kingdoms_core::KingdomStore;
use kingdoms_core::config::ServerSettings;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Parse `host:port` into a socket address.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the host is not an IP address.
pub fn socket_addr(settings: &ServerSettings) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", settings.host, settings.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))
}

/// Start the kingdoms HTTP server.
///
/// Binds, builds the router, and serves requests until `Ctrl-C`. Returns
/// `Ok(())` after a clean shutdown.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server<S: KingdomStore>(
    settings: &ServerSettings,
    state: Arc<AppState<S>>,
) -> Result<(), ServerError> {
    let addr = socket_addr(settings)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Kingdoms API listening");
    serve(listener, state).await
}

/// Serve on an already-bound listener until `Ctrl-C`.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] if the server hits a fatal I/O error.
pub async fn serve<S: KingdomStore>(
    listener: TcpListener,
    state: Arc<AppState<S>>,
) -> Result<(), ServerError> {
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Kingdoms API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}

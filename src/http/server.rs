//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::ServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind or serve: {0}")]
    Bind(#[from] std::io::Error),
}

/// Start the HTTP server.
///
/// Accepts connections until a termination signal triggers graceful shutdown,
/// then returns once in-flight requests have finished or the grace period has
/// lapsed. Each request carries the peer address for the handlers.
pub async fn start_server(app: Router, config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr();

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    tracing::info!(
        addr = %config.listen_addr,
        pid = std::process::id(),
        "HTTP server listening"
    );

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}

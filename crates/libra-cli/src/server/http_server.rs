//! HTTP server startup.

use std::io;

use axum::Router;
use tokio::net::TcpListener;

use super::lifecycle::serve_with_shutdown;
use super::shutdown::shutdown_signal;
use crate::TRACING_TARGET_STARTUP;
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` with graceful shutdown.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> io::Result<()> {
    let server_addr = server_config.server_addr();

    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                "Documentation server is listening"
            );
            listener
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                error = %error,
                "Failed to bind to address"
            );
            return Err(error);
        }
    };

    let shutdown = shutdown_signal(server_config.shutdown_timeout());
    serve_with_shutdown(&server_config, || async move {
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
    })
    .await
}

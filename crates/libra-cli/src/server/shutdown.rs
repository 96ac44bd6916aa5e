//! Stop signal for the documentation server.

use std::future::pending;
use std::time::Duration;

use crate::TRACING_TARGET_SHUTDOWN;

/// Resolves on Ctrl+C or SIGTERM.
///
/// Once resolved, the process exits if open requests have not drained
/// within `drain_timeout`.
pub async fn shutdown_signal(drain_timeout: Duration) {
    let signal = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal,
        drain_timeout_secs = drain_timeout.as_secs(),
        "Stopping documentation server"
    );

    tokio::spawn(exit_after(drain_timeout));
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "Ctrl+C listener unavailable"
        );
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "SIGTERM listener unavailable"
            );
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}

async fn exit_after(deadline: Duration) {
    tokio::time::sleep(deadline).await;
    tracing::warn!(
        target: TRACING_TARGET_SHUTDOWN,
        "Requests still open after the drain timeout, exiting"
    );
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn waits_for_a_signal() {
        let signal = shutdown_signal(Duration::from_secs(30));
        let waited = tokio::time::timeout(Duration::from_millis(50), signal).await;
        assert!(waited.is_err());
    }
}

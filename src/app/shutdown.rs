//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Resolves on Ctrl-C (and SIGTERM on Unix).
///
/// Used as the server's graceful-shutdown trigger: in-flight requests finish,
/// new connections are refused.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
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
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    log::info!("Shutdown signal received, draining connections");
}

/// Stops background tasks once the server has drained.
pub fn shutdown_gracefully(eviction_shutdown: Option<CancellationToken>) {
    if let Some(shutdown) = eviction_shutdown {
        shutdown.cancel();
    }
}

//! Shutdown signal shared by the taskboard servers.
//!
//! Servers pass [`shutdown_signal`] to `axum::serve(..).with_graceful_shutdown(..)`: they stop
//! accepting connections on the first signal and return once in-flight requests finish.

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** (container runtimes, `kill`) and **SIGINT**
/// (Ctrl-C). Elsewhere only Ctrl-C is available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    tracing::info!("shutdown signal received, draining connections");
}

//! Server startup and shutdown utilities.

use eshop_core::CancellationSource;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Prints server startup information.
pub fn print_startup_info(addr: &str, cache_enabled: bool) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Basket API: http://{}/basket", addr);
    info!("Health:     http://{}/health", addr);
    info!("Cache:      {}", if cache_enabled { "redis" } else { "disabled" });
    info!("{}", separator);
}

/// Resolves on Ctrl+C or SIGTERM. The server then stops accepting
/// connections and drains the requests already in flight.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

/// Cancels the request token once `grace` has elapsed, so requests still
/// running after the drain period stop their store and cache calls.
pub async fn cancel_after_grace(source: CancellationSource, grace: Duration) {
    tokio::time::sleep(grace).await;
    warn!(grace_secs = grace.as_secs(), "Drain period elapsed, cancelling in-flight requests");
    source.cancel();
}

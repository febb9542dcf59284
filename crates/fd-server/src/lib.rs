//! fd-server: HTTP API for browsing FL Studio projects and streaming their
//! renders.
//!
//! - Project listing with metadata decoded from `.flp` files
//! - Range-aware media streaming with bounded memory
//! - Folder configuration persisted to JSON, with cover art discovery
//! - Graceful shutdown via signal handling

pub mod context;
pub mod covers;
pub mod error;
pub mod library;
pub mod router;
pub mod routes;
pub mod streaming;

use std::net::SocketAddr;

use tokio::signal;

use fd_core::config::Config;

use crate::context::AppContext;

/// Start the server and run until a shutdown signal arrives.
pub async fn start(config: Config) -> fd_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| fd_core::Error::Internal(format!("Invalid server address: {e}")))?;

    tracing::info!(
        "Projects directory: {}",
        config.library.projects_dir.display()
    );

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::new(config);
    tracing::info!("Loaded {} folders", ctx.folders.list().len());

    let app = router::build_router(ctx, static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| fd_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}

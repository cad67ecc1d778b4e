//! HTTP server lifecycle: bind, serve, and graceful shutdown.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

use crate::config::ServerConfig;

// =============================================================================
// Server
// =============================================================================

/// Serves a router until a shutdown signal arrives.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds the configured address and serves until SIGINT or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address cannot be bound or serving fails.
    pub async fn run(self, router: Router) -> io::Result<()> {
        let address = self.config.socket_addr();
        let listener = TcpListener::bind(address).await?;
        self.serve(listener, router, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` completes.
    ///
    /// After `shutdown` resolves, in-flight requests get
    /// `config.shutdown_grace` to finish; connections still open after that
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if serving fails.
    pub async fn serve(
        self,
        listener: TcpListener,
        router: Router,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> io::Result<()> {
        match listener.local_addr() {
            Ok(address) => tracing::info!("Listening on {}", address),
            Err(error) => tracing::warn!(%error, "Could not determine local address"),
        }

        let (signalled_sender, mut signalled) = watch::channel(false);
        let serve = async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown.await;
                    let _ = signalled_sender.send(true);
                })
                .await
        };
        let grace = self.config.shutdown_grace;
        let drain_deadline = async move {
            let received = signalled.wait_for(|signalled| *signalled).await.is_ok();
            if !received {
                // Server stopped on its own; the serve branch wins.
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => result?,
            () = drain_deadline => {
                tracing::warn!(?grace, "Graceful shutdown timed out, dropping open connections");
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Returns the address this server would bind.
    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

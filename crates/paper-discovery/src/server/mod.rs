//! HTTP server.
//!
//! Exposes paper search and citation export over a small JSON API.

pub mod routes;

use std::net::SocketAddr;

use crate::discovery::PaperDiscovery;

/// HTTP front end for [`PaperDiscovery`].
#[derive(Debug, Clone)]
pub struct DiscoveryServer {
    discovery: PaperDiscovery,
}

impl DiscoveryServer {
    /// Create a server around a discovery service.
    #[must_use]
    pub const fn new(discovery: PaperDiscovery) -> Self {
        Self { discovery }
    }

    /// Build the router without binding a socket.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        routes::create_router(self.discovery.clone())
    }

    /// Serve HTTP on `0.0.0.0:port` until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound or the server fails.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", addr);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

//! HTTP server implementation
//!
//! Creates the local axum server for the coil API, with startup and
//! graceful shutdown.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use super::config::ServiceConfig;
use super::handlers::{self, AppState};
use crate::storage::Database;

/// Server control handle
///
/// Controls the lifetime of a started server; dropping it shuts the
/// server down.
pub struct ServerHandle {
    /// Shutdown signal sender
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Port the server is listening on
    port: u16,
}

impl ServerHandle {
    /// Get the listening port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Shut the server down
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The coil warehouse HTTP server
pub struct CoilServer {
    config_dir: PathBuf,
    db: Arc<Mutex<Database>>,
}

impl CoilServer {
    /// Create a new server instance over an open database
    pub fn new(config_dir: PathBuf, db: Arc<Mutex<Database>>) -> Self {
        Self { config_dir, db }
    }

    /// Start the server
    ///
    /// # Arguments
    /// * `port` - Optional port; falls back to the configured port
    ///
    /// # Returns
    /// A ServerHandle controlling the server lifetime
    pub async fn start(&self, port: Option<u16>) -> Result<ServerHandle, String> {
        let port = port.unwrap_or_else(|| ServiceConfig::load(&self.config_dir).port);
        ServiceConfig::validate_port(port)?;

        let state = Arc::new(AppState {
            db: self.db.clone(),
        });

        let app = Router::new()
            .route(
                "/api/coil",
                post(handlers::create_coil).get(handlers::list_coils),
            )
            .route("/api/coil/stats", get(handlers::coil_stats))
            .route("/api/coil/{id}", delete(handlers::delete_coil))
            .route("/api/health", get(handlers::health_check))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(state);

        // Local-only binding
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", port, e))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let graceful = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = graceful.await {
                eprintln!("[coil-warehouse] Server error: {}", e);
            }
        });

        Ok(ServerHandle {
            shutdown_tx: Some(shutdown_tx),
            port,
        })
    }

    /// Check whether a port is free to bind
    pub async fn check_port_available(port: u16) -> bool {
        tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port)))
            .await
            .is_ok()
    }
}

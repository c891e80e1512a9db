//! Server wiring: hub startup, routes and the listen loop.

use std::{future::Future, path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::usecase::{DEFAULT_HUB_BUFFER, DEFAULT_MAILBOX_CAPACITY, Hub};

use super::{
    error::ServerError,
    handler::{get_messages, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of each session mailbox
    pub mailbox_capacity: usize,
    /// Capacity of the hub event channel
    pub hub_buffer: usize,
    /// Directory served for every path not matched by a route
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            hub_buffer: DEFAULT_HUB_BUFFER,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, static_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/messages", get(get_messages))
        .fallback_service(ServeDir::new(static_dir.into()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve(listener, config, shutdown_signal()).await
}

/// Start the hub and serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let hub = Hub::spawn(config.hub_buffer);
    let state = Arc::new(AppState::new(hub, config.mailbox_capacity));
    let app = build_router(state, config.static_dir);

    tracing::info!("Server starting on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Server stopped");

    Ok(())
}

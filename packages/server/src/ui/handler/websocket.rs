//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{Connection, Identity},
    infrastructure::connection::WebSocketConnection,
    ui::state::{AppState, ConnectQuery},
    usecase::ClientSession,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Response {
    // Convert String -> Identity (Domain Model)
    let identity = match query.username.map(Identity::try_from) {
        Some(Ok(identity)) => identity,
        _ => {
            tracing::warn!("Username is required");
            return (StatusCode::BAD_REQUEST, "Username is required").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, identity))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    let connection: Arc<dyn Connection> = Arc::new(WebSocketConnection::new(socket));

    match ClientSession::start(
        connection,
        identity.clone(),
        state.hub.clone(),
        state.mailbox_capacity,
    )
    .await
    {
        Ok(tasks) => {
            tracing::info!(
                "Client '{}' connected (session {})",
                identity,
                tasks.session().id()
            );
            tasks.join().await;
            tracing::info!("Client '{}' session finished", identity);
        }
        Err(e) => {
            tracing::error!("Failed to start session for '{}': {}", identity, e);
        }
    }
}

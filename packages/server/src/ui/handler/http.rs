//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::websocket::MessageDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Message history in hub arrival order
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<MessageDto>> {
    let messages = state.hub.history().snapshot().await;
    Json(messages.iter().map(MessageDto::from).collect())
}

//! Server state and connection parameters.

use serde::Deserialize;

use crate::usecase::HubHandle;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub username: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Producer side of the hub loop
    pub hub: HubHandle,
    /// Capacity of each new session mailbox
    pub mailbox_capacity: usize,
}

impl AppState {
    pub fn new(hub: HubHandle, mailbox_capacity: usize) -> Self {
        Self {
            hub,
            mailbox_capacity,
        }
    }
}

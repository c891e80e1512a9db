//! Message history shared between the hub loop and out-of-band readers.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::Message;

/// Append-only, ordered message history.
///
/// Only the hub loop appends. Readers get a copy of the whole sequence and
/// never hold a reference into it.
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn append(&self, message: Message) {
        self.messages.write().await.push(message);
    }

    /// Copy of the history in hub arrival order.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

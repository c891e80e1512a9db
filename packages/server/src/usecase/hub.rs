//! UseCase: hub event loop
//!
//! The hub owns the registry of connected sessions and appends to the
//! message history. Every mutation goes through one event channel consumed
//! by [`Hub::run`], so registry changes, history appends and fan-out never
//! interleave.
//!
//! Fan-out uses non-blocking enqueue into each session's bounded mailbox.
//! A full mailbox drops the message for that recipient only; the loop never
//! waits on a slow client.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::domain::{History, Message, SessionId, Timestamp};

use super::{
    error::HubError,
    session::{Delivery, SessionHandle},
};

/// Default capacity of the hub event channel
pub const DEFAULT_HUB_BUFFER: usize = 256;

/// Events processed by the hub loop, in arrival order.
#[derive(Debug)]
pub enum HubEvent {
    Register(SessionHandle),
    Unregister(SessionId),
    Broadcast(Message),
}

/// Cloneable producer side of the hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::Sender<HubEvent>,
    history: History,
}

impl HubHandle {
    /// Add a session to the registry and announce it.
    pub async fn register(&self, session: SessionHandle) -> Result<(), HubError> {
        self.send(HubEvent::Register(session)).await
    }

    /// Remove a session and announce its departure. No-op for unknown ids.
    pub async fn unregister(&self, session_id: SessionId) -> Result<(), HubError> {
        self.send(HubEvent::Unregister(session_id)).await
    }

    /// Append a message to history and fan it out. Delivery is not acknowledged.
    pub async fn broadcast(&self, message: Message) -> Result<(), HubError> {
        self.send(HubEvent::Broadcast(message)).await
    }

    /// Read access to the history the hub appends to.
    pub fn history(&self) -> &History {
        &self.history
    }

    async fn send(&self, event: HubEvent) -> Result<(), HubError> {
        self.events.send(event).await.map_err(|_| HubError::Closed)
    }
}

/// The coordinating loop. Consumes events until every [`HubHandle`] is dropped.
pub struct Hub {
    events: mpsc::Receiver<HubEvent>,
    registry: HashMap<SessionId, SessionHandle>,
    history: History,
}

impl Hub {
    /// Create a hub and its handle. `buffer` bounds the event channel.
    pub fn new(buffer: usize) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let history = History::new();
        let hub = Self {
            events: rx,
            registry: HashMap::new(),
            history: history.clone(),
        };
        let handle = HubHandle {
            events: tx,
            history,
        };
        (hub, handle)
    }

    /// Create a hub and run its loop on a new task.
    pub fn spawn(buffer: usize) -> HubHandle {
        let (hub, handle) = Self::new(buffer);
        tokio::spawn(hub.run());
        handle
    }

    /// Process events one at a time until all handles are dropped.
    ///
    /// Remaining mailboxes close when the hub is dropped at the end.
    pub async fn run(mut self) {
        tracing::info!("Hub started");
        while let Some(event) = self.events.recv().await {
            self.handle(event).await;
        }
        tracing::info!(
            "Hub stopped, closing {} remaining session(s)",
            self.registry.len()
        );
    }

    async fn handle(&mut self, event: HubEvent) {
        match event {
            HubEvent::Register(session) => self.register(session).await,
            HubEvent::Unregister(session_id) => self.unregister(session_id).await,
            HubEvent::Broadcast(message) => self.broadcast(message).await,
        }
    }

    async fn register(&mut self, session: SessionHandle) {
        let joined = Message::joined(session.identity(), Timestamp::now());
        tracing::info!(
            "Client '{}' registered (session {})",
            session.identity(),
            session.id()
        );
        self.registry.insert(session.id(), session);

        self.history.append(joined.clone()).await;
        self.fan_out(&joined);
    }

    async fn unregister(&mut self, session_id: SessionId) {
        // Dropping the handle drops the only mailbox sender, closing it.
        let Some(session) = self.registry.remove(&session_id) else {
            tracing::debug!("Session {} already unregistered", session_id);
            return;
        };
        let identity = session.identity().clone();
        drop(session);
        tracing::info!(
            "Client '{}' unregistered (session {}), {} remaining",
            identity,
            session_id,
            self.registry.len()
        );

        let left = Message::left(&identity, Timestamp::now());
        self.history.append(left.clone()).await;
        self.fan_out(&left);
    }

    async fn broadcast(&mut self, message: Message) {
        self.history.append(message.clone()).await;
        self.fan_out(&message);
    }

    /// Non-blocking enqueue into every registered mailbox. Returns the
    /// number of sessions that accepted the message.
    fn fan_out(&self, message: &Message) -> usize {
        let mut delivered = 0;
        for session in self.registry.values() {
            match session.try_deliver(message) {
                Delivery::Delivered => delivered += 1,
                Delivery::Full => tracing::warn!(
                    "Mailbox full, dropping {} message for client '{}'",
                    message.kind(),
                    session.identity()
                ),
                // Writer already gone; the reader's unregister is on its way.
                Delivery::Closed => tracing::debug!(
                    "Writer for client '{}' has stopped, skipping",
                    session.identity()
                ),
            }
        }
        tracing::debug!(
            "Delivered {} message to {}/{} client(s)",
            message.kind(),
            delivered,
            self.registry.len()
        );
        delivered
    }

    #[cfg(test)]
    pub(crate) fn registered_identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self
            .registry
            .values()
            .map(|s| s.identity().as_str().to_string())
            .collect();
        identities.sort();
        identities
    }

    #[cfg(test)]
    pub(crate) fn is_registered(&self, session_id: &SessionId) -> bool {
        self.registry.contains_key(session_id)
    }

    #[cfg(test)]
    pub(crate) async fn next_event(&mut self) -> Option<HubEvent> {
        self.events.recv().await
    }
}

//! UseCase: client session
//!
//! A session bridges one [`Connection`] to the hub with two pumps:
//!
//! - the reader pump receives from the peer, stamps each message with the
//!   session identity and server time, and publishes it to the hub. When the
//!   connection fails it unregisters the session and closes the connection.
//! - the writer pump drains the session mailbox into the connection. When
//!   the hub closes the mailbox it sends a close notification and stops.
//!
//! Only the reader pump unregisters, so one session produces at most one
//! unregister event.

use std::sync::Arc;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::domain::{
    Connection, ConnectionError, Identity, Message, SessionId, SessionIdFactory, Timestamp,
};

use super::{error::HubError, hub::HubHandle};

/// Default capacity of a session mailbox
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Receiving half of a session mailbox, owned by the writer pump.
pub type Mailbox = mpsc::Receiver<Message>;

/// Outcome of a non-blocking enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Mailbox at capacity; the message was dropped
    Full,
    /// Writer pump has stopped
    Closed,
}

/// Registry entry for a session.
///
/// Holds the only sender of the session mailbox, so dropping the handle
/// closes the mailbox.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    identity: Identity,
    mailbox: mpsc::Sender<Message>,
}

impl SessionHandle {
    /// Create a handle with a fresh session id and a mailbox of `capacity`.
    pub fn open(identity: Identity, capacity: usize) -> (Self, Mailbox) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = Self {
            id: SessionIdFactory::generate(),
            identity,
            mailbox: tx,
        };
        (handle, rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Enqueue without waiting.
    pub fn try_deliver(&self, message: &Message) -> Delivery {
        match self.mailbox.try_send(message.clone()) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => Delivery::Full,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }
}

/// Per-connection state shared by the two pumps.
pub struct ClientSession {
    id: SessionId,
    identity: Identity,
    connection: Arc<dyn Connection>,
}

impl ClientSession {
    /// Register a new session with the hub and spawn its pumps.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Closed` if the hub has stopped. The connection is
    /// closed in that case.
    pub async fn start(
        connection: Arc<dyn Connection>,
        identity: Identity,
        hub: HubHandle,
        mailbox_capacity: usize,
    ) -> Result<SessionTasks, HubError> {
        let (handle, mailbox) = SessionHandle::open(identity.clone(), mailbox_capacity);
        let session = Arc::new(Self {
            id: handle.id(),
            identity,
            connection,
        });

        if let Err(e) = hub.register(handle).await {
            session.connection.close().await;
            return Err(e);
        }

        let writer = tokio::spawn(session.clone().write_pump(mailbox));
        let reader = tokio::spawn(session.clone().read_pump(hub));

        Ok(SessionTasks {
            session,
            reader,
            writer,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub(crate) async fn read_pump(self: Arc<Self>, hub: HubHandle) {
        loop {
            let incoming = match self.connection.receive().await {
                Ok(incoming) => incoming,
                Err(ConnectionError::Closed) => {
                    tracing::info!("Client '{}' closed the connection", self.identity);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Error reading from client '{}': {}", self.identity, e);
                    break;
                }
            };

            let message = Message::from_peer(incoming, &self.identity, Timestamp::now());
            if hub.broadcast(message).await.is_err() {
                tracing::warn!("Hub stopped while client '{}' was publishing", self.identity);
                break;
            }
            tracing::debug!("Message from '{}' sent to broadcast channel", self.identity);
        }

        tracing::info!("Client '{}' disconnecting", self.identity);
        if let Err(e) = hub.unregister(self.id).await {
            tracing::debug!("Could not unregister client '{}': {}", self.identity, e);
        }
        self.connection.close().await;
    }

    pub(crate) async fn write_pump(self: Arc<Self>, mut mailbox: Mailbox) {
        while let Some(message) = mailbox.recv().await {
            if let Err(e) = self.connection.send(&message).await {
                tracing::warn!("Error writing to client '{}': {}", self.identity, e);
                break;
            }
            tracing::trace!("Wrote {} message to client '{}'", message.kind(), self.identity);
        }
        self.connection.close().await;
    }
}

/// Join handles of a running session's pumps.
pub struct SessionTasks {
    session: Arc<ClientSession>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl SessionTasks {
    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Wait for both pumps to finish.
    pub async fn join(self) {
        if let Err(e) = self.reader.await {
            tracing::error!("Reader for client '{}' failed: {}", self.session.identity, e);
        }
        if let Err(e) = self.writer.await {
            tracing::error!("Writer for client '{}' failed: {}", self.session.identity, e);
        }
    }
}

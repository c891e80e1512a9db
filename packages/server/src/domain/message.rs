//! Messages exchanged through the hub.

use std::fmt;

use super::{
    error::ValueObjectError,
    value_object::{Identity, Timestamp},
};

/// Kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    /// Message published by a client
    #[default]
    Chat,
    /// Join/leave notification produced by the hub
    System,
    /// Status update published by a client
    Status,
}

impl MessageKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Chat => "chat",
            MessageKind::System => "system",
            MessageKind::Status => "status",
        }
    }
}

impl TryFrom<&str> for MessageKind {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "chat" => Ok(MessageKind::Chat),
            "system" => Ok(MessageKind::System),
            "status" => Ok(MessageKind::Status),
            other => Err(ValueObjectError::UnknownMessageKind(other.to_string())),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload as received from a peer, before the session stamps it.
///
/// Peer-supplied sender and timestamp are not represented: the server is
/// the only authority for both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncomingMessage {
    /// `None` when the peer left the type unset
    pub kind: Option<MessageKind>,
    pub content: String,
}

impl IncomingMessage {
    pub fn new(kind: Option<MessageKind>, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Immutable chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    content: String,
    sender: String,
    timestamp: Timestamp,
}

impl Message {
    /// Create a new message
    pub fn new(
        kind: MessageKind,
        content: impl Into<String>,
        sender: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind,
            content: content.into(),
            sender: sender.into(),
            timestamp,
        }
    }

    /// Stamp a peer payload with the session identity and server time.
    ///
    /// The kind falls back to [`MessageKind::Chat`] when unset.
    pub fn from_peer(incoming: IncomingMessage, sender: &Identity, timestamp: Timestamp) -> Self {
        Self::new(
            incoming.kind.unwrap_or_default(),
            incoming.content,
            sender.as_str(),
            timestamp,
        )
    }

    /// System notification announcing that `identity` joined.
    pub fn joined(identity: &Identity, timestamp: Timestamp) -> Self {
        Self::new(
            MessageKind::System,
            format!("{identity} joined the chat"),
            "",
            timestamp,
        )
    }

    /// System notification announcing that `identity` left.
    pub fn left(identity: &Identity, timestamp: Timestamp) -> Self {
        Self::new(
            MessageKind::System,
            format!("{identity} left the chat"),
            "",
            timestamp,
        )
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

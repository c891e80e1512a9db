//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identity validation error
    #[error("Identity cannot be empty")]
    IdentityEmpty,

    /// Message kind outside of chat/system/status
    #[error("Unknown message type: {0}")]
    UnknownMessageKind(String),
}

/// Errors raised by a connection adapter.
///
/// Every variant is terminal for the session that owns the connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The peer closed the connection or the stream ended
    #[error("connection closed")]
    Closed,

    /// The underlying transport failed
    #[error("transport error: {0}")]
    Transport(String),

    /// An inbound frame could not be decoded as a message
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

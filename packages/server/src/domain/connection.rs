//! Connection adapter contract.
//!
//! A connection wraps one duplex transport. The session's reader pump calls
//! [`Connection::receive`] while its writer pump calls [`Connection::send`],
//! so implementations must allow both to run concurrently.

use async_trait::async_trait;

use super::{ConnectionError, IncomingMessage, Message};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connection: Send + Sync {
    /// Wait for the next message from the peer.
    ///
    /// Any error is terminal. Malformed frames surface as
    /// [`ConnectionError::MalformedPayload`].
    async fn receive(&self) -> Result<IncomingMessage, ConnectionError>;

    /// Send one message to the peer.
    async fn send(&self, message: &Message) -> Result<(), ConnectionError>;

    /// Notify the peer and release the transport. Idempotent.
    async fn close(&self);
}

//! Domain layer for the chat hub.
//!
//! This module contains the values exchanged through the hub and the
//! connection contract, independent of the transport and of DTOs.

pub mod connection;
pub mod error;
pub mod factory;
pub mod history;
pub mod message;
pub mod value_object;

pub use connection::Connection;
pub use error::{ConnectionError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use history::History;
pub use message::{IncomingMessage, Message, MessageKind};
pub use value_object::{Identity, SessionId, Timestamp};

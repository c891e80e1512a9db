//! Infrastructure layer
//!
//! Wire DTOs and the WebSocket implementation of the domain's
//! [`Connection`](crate::domain::Connection) contract.

pub mod connection;
pub mod dto;

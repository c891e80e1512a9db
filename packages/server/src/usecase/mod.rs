//! UseCase layer
//!
//! The hub loop and the client sessions feeding it. Called from the UI
//! layer once a connection has been accepted, and operating on the domain
//! layer's values and connection contract.

pub mod error;
pub mod hub;
pub mod session;

pub use error::HubError;
pub use hub::{DEFAULT_HUB_BUFFER, Hub, HubEvent, HubHandle};
pub use session::{
    ClientSession, DEFAULT_MAILBOX_CAPACITY, Delivery, Mailbox, SessionHandle, SessionTasks,
};

//! In-memory publish/subscribe chat hub over WebSocket.
//!
//! Every connected client gets a session with a reader pump and a writer
//! pump. All shared state (registry of sessions, message history) is owned
//! by one hub loop that processes register, unregister and broadcast events
//! in arrival order and fans messages out to bounded per-session mailboxes.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, ServerError, run, serve};

//! UseCase layer error definitions.

use thiserror::Error;

/// Errors returned by [`HubHandle`](super::HubHandle) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    /// The hub loop has stopped and no longer accepts events
    #[error("hub is not running")]
    Closed,
}

//! Command channel errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid command payload: {0}")]
    InvalidPayload(String),

    #[error("Text must not be empty")]
    EmptyText,
}

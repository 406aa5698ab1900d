//! Runtime errors

use bridge_client::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid server entry: {0}")]
    Transport(#[from] TransportError),

    #[error("Server already registered: {0}")]
    DuplicateServer(String),
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "INVALID_SERVER",
            Self::DuplicateServer(_) => "DUPLICATE_SERVER",
        }
    }
}

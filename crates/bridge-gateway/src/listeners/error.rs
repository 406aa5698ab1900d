//! Handler error types

use std::fmt;

use bridge_client::TransportError;
use bridge_core::{DomainError, SinkError};
use thiserror::Error;

/// Listener failure
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Management API call failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Domain error (player lookups)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Chat platform delivery failed
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Listener failed: {0}")]
    Failed(String),
}

impl HandlerError {
    pub fn failed(msg: impl fmt::Display) -> Self {
        Self::Failed(msg.to_string())
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;

//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Malformed console record: {0}")]
    MalformedRecord(String),

    /// Upstream roster or API failure, already rendered to text
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "UNKNOWN_PLAYER",
            Self::MalformedRecord(_) => "MALFORMED_RECORD",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlayerNotFound(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

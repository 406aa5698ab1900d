//! Transport errors

use bridge_core::DomainError;
use thiserror::Error;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Failure of a single management API call
///
/// Request timeouts of `execute_command` are not errors; they surface as
/// `CommandOutput::NoResponse`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{operation} request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} response could not be decoded: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    Config { endpoint: String, reason: String },
}

impl TransportError {
    pub(crate) fn request(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Request { operation, source }
    }

    pub(crate) fn decode(operation: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Name of the operation that failed
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Request { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
            Self::Config { .. } => "configure",
        }
    }

    /// Check if the remote end could not be reached at all
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_connect())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_timeout())
    }

    /// HTTP status of a non-2xx reply
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for DomainError {
    fn from(err: TransportError) -> Self {
        DomainError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = TransportError::Status {
            operation: "broadcast",
            status: 401,
            body: "unauthorized".to_string(),
        };

        assert_eq!(err.operation(), "broadcast");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_connect());
        assert_eq!(err.to_string(), "broadcast returned HTTP 401: unauthorized");
    }

    #[test]
    fn test_into_domain_error() {
        let err = TransportError::decode("all_players", "expected array");
        let domain: DomainError = err.into();
        assert!(domain.is_upstream());
        assert!(domain.to_string().contains("all_players"));
    }
}

//! Domain errors

mod domain_error;

pub use domain_error::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

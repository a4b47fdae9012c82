//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building expansion inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One of the required plain variables was not supplied.
    #[error("missing required variable: {0}")]
    MissingRequiredVariable(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

//! Application error types

use thiserror::Error;

use crate::ports::EnvironmentError;

/// Faults that abort the expansion of a single string.
///
/// Recoverable problems such as unknown variables or failed commands are
/// reported through `ExpansionErrorList` instead.
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// The environment could not be read.
    #[error("environment error: {0}")]
    Environment(#[from] EnvironmentError),
}

/// Result type alias for expansion operations.
pub type ExpansionResult<T> = Result<T, ExpansionError>;

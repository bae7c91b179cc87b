//! Domain-level errors.
//!
//! Validation failures are the only errors the domain raises on its own.
//! They are independent of infrastructure concerns (database, CLI).

use thiserror::Error;

/// A rejected input, carrying the human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    /// Create a validation error
    pub fn new(msg: impl Into<String>) -> Self {
        ValidationError(msg.into())
    }

    /// The reason shown to the caller
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, ValidationError>;

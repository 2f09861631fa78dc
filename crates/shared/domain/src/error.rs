//! Domain-level errors.
//!
//! These errors represent invalid domain values. Business rule violations
//! are not errors; they are reported as [`crate::Failure`] values.

use thiserror::Error;

/// Domain-specific errors for malformed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value could not be parsed or is outside its allowed set
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

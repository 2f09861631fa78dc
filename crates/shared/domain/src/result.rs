//! Operation results returned by every business operation.
//!
//! A [`ServiceResult`] is either a success, optionally carrying a message and
//! a payload, or a [`Failure`] carrying a kind and a human-readable message.
//! A failure never carries a payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an expected business failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FailureKind {
    /// The referenced record does not exist
    NotFound,
    /// Another record already holds the natural key
    DuplicateKey,
    /// Field-level validation rejected the input
    ValidationFailed,
    /// The caller lacks the roles required by the operation
    Unauthorized,
}

impl FailureKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "NOT_FOUND",
            FailureKind::DuplicateKey => "DUPLICATE_KEY",
            FailureKind::ValidationFailed => "VALIDATION_FAILED",
            FailureKind::Unauthorized => "UNAUTHORIZED",
        }
    }
}

/// An expected business failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::new(FailureKind::DuplicateKey, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unauthorized, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

/// Outcome of a business operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServiceResult<T = ()> {
    Success { data: T, message: Option<String> },
    Failure(Failure),
}

/// Result of an operation or rule check without a payload.
pub type Outcome = ServiceResult<()>;

impl ServiceResult<()> {
    /// Success without message.
    pub fn ok() -> Self {
        ServiceResult::Success {
            data: (),
            message: None,
        }
    }

    /// Success with a message.
    pub fn ok_with(message: impl Into<String>) -> Self {
        ServiceResult::Success {
            data: (),
            message: Some(message.into()),
        }
    }
}

impl<T> ServiceResult<T> {
    /// Success carrying a payload.
    pub fn success(data: T) -> Self {
        ServiceResult::Success {
            data,
            message: None,
        }
    }

    /// Success carrying a payload and a message.
    pub fn success_with(data: T, message: impl Into<String>) -> Self {
        ServiceResult::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(failure: Failure) -> Self {
        ServiceResult::Failure(failure)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResult::Success { .. })
    }

    /// Message of either variant, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceResult::Success { message, .. } => message.as_deref(),
            ServiceResult::Failure(failure) => Some(failure.message.as_str()),
        }
    }

    /// Payload of a success; `None` for failures.
    pub fn data(&self) -> Option<&T> {
        match self {
            ServiceResult::Success { data, .. } => Some(data),
            ServiceResult::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ServiceResult::Success { data, .. } => Some(data),
            ServiceResult::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&Failure> {
        match self {
            ServiceResult::Success { .. } => None,
            ServiceResult::Failure(failure) => Some(failure),
        }
    }

    pub fn into_failure(self) -> Option<Failure> {
        match self {
            ServiceResult::Success { .. } => None,
            ServiceResult::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            ServiceResult::Success { data, .. } => Ok(data),
            ServiceResult::Failure(failure) => Err(failure),
        }
    }

    /// Transform the payload, keeping the message.
    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ServiceResult::Success { data, message } => ServiceResult::Success {
                data: f(data),
                message,
            },
            ServiceResult::Failure(failure) => ServiceResult::Failure(failure),
        }
    }
}

impl<T> From<Failure> for ServiceResult<T> {
    fn from(failure: Failure) -> Self {
        ServiceResult::Failure(failure)
    }
}

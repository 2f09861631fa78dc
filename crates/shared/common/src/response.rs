//! JSON envelope for business results.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{FailureKind, ServiceResult};
use serde::Serialize;

/// Standard API response wrapper, mirroring `ServiceResult`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure category, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

impl<T: Serialize> From<ServiceResult<T>> for ApiResponse<T> {
    fn from(result: ServiceResult<T>) -> Self {
        match result {
            ServiceResult::Success { data, message } => Self {
                success: true,
                message,
                data: Some(data),
                kind: None,
            },
            ServiceResult::Failure(failure) => Self {
                success: false,
                message: Some(failure.message),
                data: None,
                kind: Some(failure.kind),
            },
        }
    }
}

/// HTTP status for a business failure.
pub fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::DuplicateKey => StatusCode::CONFLICT,
        FailureKind::ValidationFailed => StatusCode::BAD_REQUEST,
        FailureKind::Unauthorized => StatusCode::UNAUTHORIZED,
    }
}

/// Response carrying a `ServiceResult` in the standard envelope.
pub struct ResultResponse<T> {
    result: ServiceResult<T>,
    success_status: StatusCode,
}

impl<T> ResultResponse<T> {
    /// Success maps to 200 OK.
    pub fn ok(result: ServiceResult<T>) -> Self {
        Self {
            result,
            success_status: StatusCode::OK,
        }
    }

    /// Success maps to 201 Created.
    pub fn created(result: ServiceResult<T>) -> Self {
        Self {
            result,
            success_status: StatusCode::CREATED,
        }
    }

    fn status(&self) -> StatusCode {
        match &self.result {
            ServiceResult::Success { .. } => self.success_status,
            ServiceResult::Failure(failure) => failure_status(failure.kind),
        }
    }
}

impl<T: Serialize> IntoResponse for ResultResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiResponse::from(self.result))).into_response()
    }
}

//! Unified error handling for the API.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use lumigate_devices::RelayError;

/// Error response with its HTTP status.
///
/// Rendered as `{"code": ..., "detail": ...}`, plus `errors` for validation failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable detail.
    #[serde(rename = "detail")]
    pub message: String,
    /// HTTP status code.
    #[serde(skip)]
    pub status: StatusCode,
    /// Per-field validation errors.
    #[serde(rename = "errors", skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Not found (404).
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("{} not found", resource.into()),
            StatusCode::NOT_FOUND,
        )
    }

    /// Validation error (422).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            "VALIDATION_FAILED",
            message,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    }

    /// Internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, axum::Json(self)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Every relay failure collapses to a 500 carrying the stringified cause.
impl From<RelayError> for ErrorResponse {
    fn from(e: RelayError) -> Self {
        tracing::error!(category = "relay", "Vendor call failed: {}", e);
        Self::internal(e.to_string())
    }
}

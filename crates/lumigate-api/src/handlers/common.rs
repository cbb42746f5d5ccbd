//! Common API handler utilities.

use axum::response::Json;
use serde::Serialize;

use crate::models::error::ErrorResponse;

/// Unified Result type for all API handlers.
///
/// Successful bodies are returned as-is, which for relayed calls is the vendor's
/// own JSON.
pub type HandlerResult<T> = Result<Json<T>, ErrorResponse>;

/// Wrap a value as a successful handler response.
pub fn ok<T: Serialize>(data: T) -> HandlerResult<T> {
    Ok(Json(data))
}

//! Request validation layer.
//!
//! Bodies are deserialized and checked before any vendor call is made. Both
//! malformed JSON and out-of-range values come back as a 422 listing every
//! offending field.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lumigate_core::DeviceId;

use crate::models::{ErrorResponse, SkuQuery};

/// Validation error details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,

    /// Error message.
    pub message: String,
}

/// Collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a validation error.
    pub fn add(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(ValidationError {
            field: field.into(),
            message: message.into(),
        });
        self
    }

    /// Fold the outcome of another check into this collection.
    pub fn check(mut self, result: Result<(), ValidationErrors>) -> Self {
        if let Err(other) = result {
            self.errors.extend(other.errors);
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }

    /// Convert to ErrorResponse.
    pub fn to_response_error(&self) -> ErrorResponse {
        ErrorResponse::validation(format!(
            "Validation failed: {} error(s)",
            self.errors.len()
        ))
        .with_details(serde_json::to_value(&self.errors).unwrap_or_default())
    }
}

impl From<ValidationErrors> for ErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        errors.to_response_error()
    }
}

/// Trait for validatable request bodies.
pub trait Validate {
    /// Validate the request data.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

// ============================================================================
// Common Validation Rules
// ============================================================================

/// Validate that a string is not empty.
pub fn validate_not_empty(field: &str, value: &str) -> Result<(), ValidationErrors> {
    if value.trim().is_empty() {
        Err(ValidationErrors::new().add(field, "cannot be empty"))
    } else {
        Ok(())
    }
}

/// Validate that a value is within an inclusive range.
pub fn validate_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationErrors>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min {
        Err(ValidationErrors::new().add(field, format!("must be at least {}", min)))
    } else if value > max {
        Err(ValidationErrors::new().add(field, format!("must be at most {}", max)))
    } else {
        Ok(())
    }
}

/// Validate an `r`, `g`, `b` triple; `prefix` is prepended to field names.
pub fn validate_rgb(prefix: &str, r: i64, g: i64, b: i64) -> Result<(), ValidationErrors> {
    ValidationErrors::new()
        .check(validate_range(&format!("{}r", prefix), r, 0, 255))
        .check(validate_range(&format!("{}g", prefix), g, 0, 255))
        .check(validate_range(&format!("{}b", prefix), b, 0, 255))
        .into_result()
}

// ============================================================================
// Extractor
// ============================================================================

/// JSON body that has passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ErrorResponse::from(ValidationErrors::new().add("body", rejection.body_text()))
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Device addressed by a `:device_id` path segment and a `?sku=` query.
#[derive(Debug, Clone)]
pub struct DeviceTarget(pub DeviceId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for DeviceTarget
where
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(device_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ErrorResponse::from(ValidationErrors::new().add("device_id", rejection.body_text()))
            })?;
        let Query(query) = Query::<SkuQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ErrorResponse::from(ValidationErrors::new().add("sku", rejection.body_text()))
            })?;
        validate_not_empty("sku", &query.sku)?;
        Ok(Self(DeviceId::new(device_id, query.sku)))
    }
}

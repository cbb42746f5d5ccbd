//! REST surface for the lumigate gateway.
//!
//! Thin axum layer over [`lumigate_devices::VendorClient`]: request bodies are
//! validated, encoded into capabilities and relayed; vendor responses come back
//! unchanged apart from the read-model views.

pub mod handlers;
pub mod models;
pub mod server;
pub mod shutdown;
pub mod validator;

pub use models::ErrorResponse;
pub use server::{MAX_REQUEST_BODY_SIZE, ServerState, create_router, run};
pub use validator::{
    DeviceTarget, Validate, ValidatedJson, ValidationError, ValidationErrors, validate_not_empty,
    validate_range, validate_rgb,
};

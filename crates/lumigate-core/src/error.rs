//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or configuring.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A packed color is outside the 24-bit range.
    #[error("Invalid packed color: {0}")]
    InvalidColor(u64),
}

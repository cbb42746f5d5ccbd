//! Relay error types.

use thiserror::Error;

/// Result type for relay operations.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

/// Errors surfaced by outbound vendor calls.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The vendor answered with a non-2xx status.
    #[error("Vendor returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A multi-group canvas draw stopped part-way. Groups already applied stay applied.
    #[error("Canvas draw aborted after {applied} of {total} color groups: {source}")]
    CanvasAborted {
        applied: usize,
        total: usize,
        #[source]
        source: Box<RelayError>,
    },
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

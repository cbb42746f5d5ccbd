//! Server state and types.

use std::sync::Arc;

use lumigate_devices::VendorClient;

/// Maximum request body size (1 MiB)
pub const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// Server state shared across all handlers.
///
/// Immutable after start-up; cloning only bumps the client refcount.
#[derive(Clone)]
pub struct ServerState {
    /// Vendor relay used by every device handler.
    pub client: Arc<VendorClient>,

    /// Unix timestamp of server start, for the health uptime.
    pub started_at: i64,
}

impl ServerState {
    pub fn new(client: VendorClient) -> Self {
        Self {
            client: Arc::new(client),
            started_at: chrono::Utc::now().timestamp(),
        }
    }
}

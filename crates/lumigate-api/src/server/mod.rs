//! HTTP server for the lumigate REST surface.

pub mod router;
pub mod types;

pub use router::create_router;
pub use types::{MAX_REQUEST_BODY_SIZE, ServerState};

use lumigate_core::GatewayConfig;
use lumigate_devices::VendorClient;

/// Build the vendor client from `config` and serve until Ctrl+C or SIGTERM.
pub async fn run(config: GatewayConfig) -> anyhow::Result<()> {
    let client = VendorClient::from_config(&config)?;
    let state = ServerState::new(client);
    let app = create_router(state);

    let bind = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(
        bind = %bind,
        vendor = %config.base_url,
        "lumigate listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

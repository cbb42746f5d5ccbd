//! Command-line interface for the lumigate gateway.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lumigate_core::config::env_vars;
use lumigate_core::{DeviceId, GatewayConfig, views};
use lumigate_devices::VendorClient;

/// Lumigate - local REST gateway for Govee cloud-controlled lights.
#[derive(Parser, Debug)]
#[command(name = "lumigate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to ./lumigate.toml when present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the REST server.
    Serve {
        /// Host to bind to (overrides config and environment).
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides config and environment).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the vendor device list.
    Devices,
    /// Print the current power, brightness and color of one device.
    State {
        /// Device identifier (usually a MAC-like string).
        device: String,
        /// Device model.
        #[arg(long)]
        sku: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Variables already set in the process win over `.env`.
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = GatewayConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Serve { host, port } => lumigate_api::run(config.with_bind(host, port)).await,
        Command::Devices => list_devices(&config).await,
        Command::State { device, sku } => show_state(&config, DeviceId::new(device, sku)).await,
    }
}

fn init_tracing(verbose: bool) {
    // Check if JSON logging is requested (for production/container environments)
    let json_logging = std::env::var(env_vars::LOG_JSON)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let default_directive = if verbose { "lumigate=debug" } else { "lumigate=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn list_devices(config: &GatewayConfig) -> Result<()> {
    let client = VendorClient::from_config(config)?;
    let devices = client.get_devices().await?;
    println!("{}", serde_json::to_string_pretty(&devices)?);
    Ok(())
}

async fn show_state(config: &GatewayConfig, id: DeviceId) -> Result<()> {
    let client = VendorClient::from_config(config)?;
    let state = client.get_device_state(&id).await?;
    let view = views::current_color_view(&id, &state);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

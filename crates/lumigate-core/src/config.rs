//! Gateway configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. a TOML file (`lumigate.toml`, or an explicit path)
//! 3. environment variables
//!
//! Command-line flags are layered on top by the binary.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default endpoint constants.
pub mod endpoints {
    pub const GOVEE_BASE_URL: &str = "https://openapi.api.govee.com/router/api/v1";
    pub const DEVICES: &str = "/user/devices";
    pub const DEVICE_STATE: &str = "/device/state";
    pub const DEVICE_CONTROL: &str = "/device/control";
}

/// Outbound header names.
pub mod headers {
    pub const API_KEY: &str = "Govee-API-Key";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const JSON: &str = "application/json";
}

/// Environment variable names.
pub mod env_vars {
    pub const API_KEY: &str = "GOVEE_API_KEY";
    pub const BASE_URL: &str = "GOVEE_BASE_URL";
    pub const HOST: &str = "LUMIGATE_HOST";
    pub const PORT: &str = "LUMIGATE_PORT";
    pub const HTTP_TIMEOUT_SECS: &str = "LUMIGATE_HTTP_TIMEOUT_SECS";
    pub const LOG_JSON: &str = "LUMIGATE_LOG_JSON";
}

/// Server defaults.
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_CONFIG_FILE: &str = "lumigate.toml";
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    govee: VendorSection,
    #[serde(default)]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VendorSection {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

/// Resolved gateway configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Static vendor API key, sent on every outbound call.
    pub api_key: String,
    /// Vendor API root, without trailing slash.
    pub base_url: String,
    /// Outbound request timeout; `None` keeps the HTTP library default.
    pub timeout_secs: Option<u64>,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl GatewayConfig {
    /// Configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: endpoints::GOVEE_BASE_URL.to_string(),
            timeout_secs: None,
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
        }
    }

    /// Load from file and process environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => Some(read_file(path)?),
            None => {
                let default = PathBuf::from(server::DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(read_file(&default)?)
                } else {
                    None
                }
            }
        }
        .unwrap_or_default();

        let api_key = env(env_vars::API_KEY)
            .or(file.govee.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "vendor API key is required (set {} or govee.api_key)",
                    env_vars::API_KEY
                ))
            })?;

        let base_url = env(env_vars::BASE_URL)
            .or(file.govee.base_url)
            .unwrap_or_else(|| endpoints::GOVEE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match env(env_vars::HTTP_TIMEOUT_SECS) {
            Some(raw) => Some(parse_env(env_vars::HTTP_TIMEOUT_SECS, &raw)?),
            None => file.govee.timeout_secs,
        };

        let host = env(env_vars::HOST)
            .or(file.server.host)
            .unwrap_or_else(|| server::DEFAULT_HOST.to_string());

        let port = match env(env_vars::PORT) {
            Some(raw) => parse_env(env_vars::PORT, &raw)?,
            None => file.server.port.unwrap_or(server::DEFAULT_PORT),
        };

        let config = Self {
            api_key,
            base_url,
            timeout_secs,
            host,
            port,
        };
        debug!(category = "config", ?config, "Resolved gateway configuration");
        Ok(config)
    }

    /// Override the bind address (command-line flags).
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    info!(category = "config", "Loading config from: {}", path.display());
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw)))
}

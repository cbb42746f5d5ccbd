//! Outbound HTTP transport.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RelayResult;

/// HTTP methods the vendor API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully-resolved outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl VendorRequest {
    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes one vendor call and returns the parsed JSON body.
///
/// Implementations must map non-2xx statuses to [`crate::RelayError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: VendorRequest) -> RelayResult<Value>;
}

#[cfg(feature = "http")]
pub use self::http::ReqwestTransport;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;
    use serde_json::Value;
    use tracing::{debug, warn};

    use super::{HttpMethod, Transport, VendorRequest};
    use crate::error::{RelayError, RelayResult};

    /// reqwest-backed transport.
    ///
    /// Idle connections are not kept, so each call opens and closes its own.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        /// Build a transport; `timeout` of `None` keeps reqwest's default.
        pub fn new(timeout: Option<Duration>) -> RelayResult<Self> {
            let mut builder = Client::builder().pool_max_idle_per_host(0);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| RelayError::Transport(format!("HTTP client build failed: {}", e)))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, request: VendorRequest) -> RelayResult<Value> {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if let Some(body) = &request.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }

            debug!(category = "relay", method = ?request.method, url = %request.url, "Sending vendor request");

            let response = builder
                .send()
                .await
                .map_err(|e| RelayError::Transport(format!("HTTP request failed: {}", e)))?;

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| RelayError::Transport(format!("reading response body: {}", e)))?;

            if !status.is_success() {
                warn!(category = "relay", status = status.as_u16(), url = %request.url, "Vendor request failed");
                return Err(RelayError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }

            serde_json::from_slice(&bytes).map_err(|e| {
                RelayError::Decode(format!(
                    "parsing response as json: {}: {}",
                    e,
                    String::from_utf8_lossy(&bytes)
                ))
            })
        }
    }
}

//! Lumigate device relay.
//!
//! Forwards encoded capability envelopes and read queries to the vendor cloud API
//! and hands back the parsed JSON.
//!
//! ## Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `http` | ✅ | reqwest-backed [`ReqwestTransport`] |
//!
//! ## Architecture
//!
//! - **Transport**: one outbound call, injectable so tests can record requests
//! - **VendorClient**: one method per vendor operation, builds envelopes and headers

pub mod client;
pub mod error;
pub mod transport;

#[cfg(feature = "testing")]
pub mod testing;

pub use client::VendorClient;
pub use error::{RelayError, RelayResult};
pub use transport::{HttpMethod, Transport, VendorRequest};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;

//! Lumigate core crate.
//!
//! Pure building blocks shared by the relay and the REST surface:
//!
//! - **color**: 24-bit RGB packing used by every color-carrying capability
//! - **capability**: the tagged union of supported `{type, instance, value}` triples
//! - **envelope**: the `{requestId, payload}` body sent to the vendor
//! - **canvas**: segment-as-pixel grouping for bulk color assignment
//! - **views**: read-model projections over fetched vendor JSON
//! - **config**: endpoint constants and layered gateway configuration
//!
//! Nothing in this crate performs I/O apart from reading the optional config file.

pub mod canvas;
pub mod capability;
pub mod color;
pub mod config;
pub mod envelope;
pub mod error;
pub mod views;

pub use canvas::{ColorGroup, DEFAULT_CANVAS_SEGMENTS, Pixel, clear_segments, group_by_color};
pub use capability::{Capability, CapabilityKind, CapabilityPayload, MusicMode, PowerState};
pub use color::Rgb;
pub use config::GatewayConfig;
pub use envelope::{ControlPayload, ControlRequest, DeviceId, new_request_id};
pub use error::{Error, Result};

//! Vendor request envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// The `(device, sku)` pair that addresses a physical unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId {
    pub device: String,
    pub sku: String,
}

impl DeviceId {
    pub fn new(device: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            sku: sku.into(),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sku, self.device)
    }
}

/// Body of every POST to the vendor.
#[derive(Debug, Clone, Serialize)]
pub struct ControlRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub payload: ControlPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlPayload {
    pub sku: String,
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<Capability>,
}

impl ControlRequest {
    /// Envelope for `device/control`.
    pub fn control(request_id: impl Into<String>, id: &DeviceId, capability: Capability) -> Self {
        Self {
            request_id: request_id.into(),
            payload: ControlPayload {
                sku: id.sku.clone(),
                device: id.device.clone(),
                capability: Some(capability),
            },
        }
    }

    /// Envelope for `device/state`; carries no capability.
    pub fn state_query(request_id: impl Into<String>, id: &DeviceId) -> Self {
        Self {
            request_id: request_id.into(),
            payload: ControlPayload {
                sku: id.sku.clone(),
                device: id.device.clone(),
                capability: None,
            },
        }
    }
}

/// Fresh identifier for the vendor's request tracing.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

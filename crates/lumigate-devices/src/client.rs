//! Vendor API client.
//!
//! One method per vendor operation. Every control call wraps its capability in a
//! fresh `{requestId, payload}` envelope and POSTs it to `device/control`.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use lumigate_core::capability::{Capability, MusicMode, PowerState};
use lumigate_core::config::{endpoints, headers};
use lumigate_core::{
    ControlRequest, DeviceId, GatewayConfig, Pixel, Rgb, clear_segments, group_by_color,
    new_request_id,
};

use crate::error::{RelayError, RelayResult};
use crate::transport::{HttpMethod, Transport, VendorRequest};

/// Client for the vendor's device API.
#[derive(Clone)]
pub struct VendorClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for VendorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl VendorClient {
    /// Create a client over an arbitrary transport.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            transport,
        }
    }

    /// Create a client backed by [`crate::ReqwestTransport`].
    #[cfg(feature = "http")]
    pub fn from_config(config: &GatewayConfig) -> RelayResult<Self> {
        let timeout = config.timeout_secs.map(std::time::Duration::from_secs);
        let transport = crate::transport::ReqwestTransport::new(timeout)?;
        Ok(Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            Arc::new(transport),
        ))
    }

    /// Create a client over `transport` using the key and URL from `config`.
    pub fn with_transport(config: &GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone(), transport)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> VendorRequest {
        VendorRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                (headers::API_KEY.to_string(), self.api_key.clone()),
                (headers::CONTENT_TYPE.to_string(), headers::JSON.to_string()),
            ],
            body,
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// `GET user/devices`.
    pub async fn get_devices(&self) -> RelayResult<Value> {
        self.transport
            .execute(self.request(HttpMethod::Get, endpoints::DEVICES, None))
            .await
    }

    /// `POST device/state`.
    pub async fn get_device_state(&self, id: &DeviceId) -> RelayResult<Value> {
        let body = serde_json::to_value(ControlRequest::state_query(new_request_id(), id))?;
        self.transport
            .execute(self.request(HttpMethod::Post, endpoints::DEVICE_STATE, Some(body)))
            .await
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// `POST device/control` with one capability.
    pub async fn control_device(&self, id: &DeviceId, capability: Capability) -> RelayResult<Value> {
        let request_id = new_request_id();
        debug!(
            category = "relay",
            device = %id,
            request_id = %request_id,
            instance = %capability.encode().instance,
            "Sending control command"
        );
        let body = serde_json::to_value(ControlRequest::control(request_id, id, capability))?;
        self.transport
            .execute(self.request(HttpMethod::Post, endpoints::DEVICE_CONTROL, Some(body)))
            .await
    }

    pub async fn set_power(&self, id: &DeviceId, state: PowerState) -> RelayResult<Value> {
        self.control_device(id, Capability::Power(state)).await
    }

    pub async fn turn_on(&self, id: &DeviceId) -> RelayResult<Value> {
        self.set_power(id, PowerState::On).await
    }

    pub async fn turn_off(&self, id: &DeviceId) -> RelayResult<Value> {
        self.set_power(id, PowerState::Off).await
    }

    pub async fn set_brightness(&self, id: &DeviceId, brightness: u8) -> RelayResult<Value> {
        self.control_device(id, Capability::Brightness(brightness)).await
    }

    pub async fn set_color(&self, id: &DeviceId, rgb: Rgb) -> RelayResult<Value> {
        self.control_device(id, Capability::ColorRgb(rgb)).await
    }

    pub async fn set_color_temp(&self, id: &DeviceId, kelvin: u32) -> RelayResult<Value> {
        self.control_device(id, Capability::ColorTemperature(kelvin)).await
    }

    pub async fn set_toggle(&self, id: &DeviceId, instance: &str, value: i64) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::Toggle {
                instance: instance.to_string(),
                value,
            },
        )
        .await
    }

    pub async fn set_gradient_toggle(&self, id: &DeviceId, on: bool) -> RelayResult<Value> {
        self.control_device(id, Capability::gradient(on)).await
    }

    pub async fn set_segment_color(
        &self,
        id: &DeviceId,
        segments: Vec<u32>,
        rgb: Rgb,
    ) -> RelayResult<Value> {
        self.control_device(id, Capability::SegmentColor { segments, rgb })
            .await
    }

    pub async fn set_segment_brightness(
        &self,
        id: &DeviceId,
        segments: Vec<u32>,
        brightness: u8,
    ) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::SegmentBrightness {
                segments,
                brightness,
            },
        )
        .await
    }

    pub async fn set_scene(&self, id: &DeviceId, instance: &str, value: i64) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::Scene {
                instance: instance.to_string(),
                value,
            },
        )
        .await
    }

    pub async fn set_diy_scene(&self, id: &DeviceId, value: i64) -> RelayResult<Value> {
        self.control_device(id, Capability::DiyScene(value)).await
    }

    pub async fn set_snapshot(&self, id: &DeviceId, value: i64) -> RelayResult<Value> {
        self.control_device(id, Capability::Snapshot(value)).await
    }

    pub async fn set_music_mode(&self, id: &DeviceId, mode: MusicMode) -> RelayResult<Value> {
        self.control_device(id, Capability::MusicMode(mode)).await
    }

    pub async fn set_work_mode(
        &self,
        id: &DeviceId,
        work_mode: i64,
        mode_value: i64,
    ) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::WorkMode {
                work_mode,
                mode_value,
            },
        )
        .await
    }

    pub async fn set_range(&self, id: &DeviceId, instance: &str, value: i64) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::Range {
                instance: instance.to_string(),
                value,
            },
        )
        .await
    }

    pub async fn set_mode(&self, id: &DeviceId, instance: &str, value: i64) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::Mode {
                instance: instance.to_string(),
                value,
            },
        )
        .await
    }

    /// Forward a caller-built triple unchanged.
    pub async fn generic_control(
        &self,
        id: &DeviceId,
        kind: &str,
        instance: &str,
        value: Value,
    ) -> RelayResult<Value> {
        self.control_device(
            id,
            Capability::Generic {
                kind: kind.to_string(),
                instance: instance.to_string(),
                value,
            },
        )
        .await
    }

    // ========================================================================
    // Canvas
    // ========================================================================

    /// Paint pixels, one segment-color call per distinct color.
    ///
    /// Groups are sent in order and the first failure stops the draw. Groups
    /// already sent are not rolled back; the error reports how many were applied.
    pub async fn draw_canvas(&self, id: &DeviceId, pixels: &[Pixel]) -> RelayResult<Value> {
        let groups = group_by_color(pixels);
        let total = groups.len();
        let mut results = Vec::with_capacity(total);

        for (applied, group) in groups.into_iter().enumerate() {
            match self.set_segment_color(id, group.segments, group.rgb).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(
                        category = "canvas",
                        device = %id,
                        applied,
                        total,
                        "Canvas draw aborted: {}",
                        e
                    );
                    return Err(RelayError::CanvasAborted {
                        applied,
                        total,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(json!({ "results": results }))
    }

    pub async fn fill_canvas(&self, id: &DeviceId, segments: Vec<u32>, rgb: Rgb) -> RelayResult<Value> {
        self.set_segment_color(id, segments, rgb).await
    }

    /// Set segments `0..num_segments` to black.
    pub async fn clear_canvas(&self, id: &DeviceId, num_segments: u32) -> RelayResult<Value> {
        self.set_segment_color(id, clear_segments(num_segments), Rgb::BLACK)
            .await
    }
}

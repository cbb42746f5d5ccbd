//! Device discovery and state read handlers.
//!
//! Lookups go through the vendor device list every time; a `(device, sku)` pair
//! missing from that list is a 404.

use axum::extract::State;
use serde_json::Value;

use lumigate_core::DeviceId;
use lumigate_core::views::{
    self, CapabilitiesView, CurrentColorView, FullStateView, MusicModesView, ScenesView,
    SegmentsView,
};

use super::{
    ServerState,
    common::{HandlerResult, ok},
};
use crate::models::{DeviceCommand, ErrorResponse};
use crate::validator::{DeviceTarget, ValidatedJson};

/// Fetch the device list and pick out one entry.
async fn lookup_device(state: &ServerState, id: &DeviceId) -> Result<Value, ErrorResponse> {
    let devices = state.client.get_devices().await?;
    match views::find_device(&devices, id) {
        Some(device) => Ok(device.clone()),
        None => {
            tracing::debug!(device = %id, "Device not in vendor list");
            Err(ErrorResponse::not_found("Device"))
        }
    }
}

/// List devices.
///
/// GET /devices
pub async fn list_devices_handler(State(state): State<ServerState>) -> HandlerResult<Value> {
    ok(state.client.get_devices().await?)
}

/// Get a single device entry.
///
/// GET /devices/:device_id?sku=
pub async fn get_device_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<Value> {
    ok(lookup_device(&state, &id).await?)
}

/// GET /devices/:device_id/state?sku=
pub async fn get_device_state_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<Value> {
    ok(state.client.get_device_state(&id).await?)
}

/// Same state query, addressed by a JSON body.
///
/// POST /devices/state
pub async fn query_device_state_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<DeviceCommand>,
) -> HandlerResult<Value> {
    ok(state.client.get_device_state(&req.id()).await?)
}

/// GET /devices/:device_id/capabilities?sku=
pub async fn get_capabilities_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<CapabilitiesView> {
    let device = lookup_device(&state, &id).await?;
    ok(views::capabilities_view(&id, &device))
}

/// GET /devices/:device_id/segments?sku=
pub async fn get_segments_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<SegmentsView> {
    let device = lookup_device(&state, &id).await?;
    ok(views::segments_view(&id, &device))
}

/// GET /devices/:device_id/scenes?sku=
pub async fn get_scenes_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<ScenesView> {
    let device = lookup_device(&state, &id).await?;
    ok(views::scenes_view(&id, &device))
}

/// GET /devices/:device_id/music-modes?sku=
pub async fn get_music_modes_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<MusicModesView> {
    let device = lookup_device(&state, &id).await?;
    ok(views::music_modes_view(&id, &device))
}

/// GET /devices/:device_id/current-color?sku=
pub async fn get_current_color_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<CurrentColorView> {
    let device_state = state.client.get_device_state(&id).await?;
    ok(views::current_color_view(&id, &device_state))
}

/// State payload merged with the device list entry.
///
/// GET /devices/:device_id/full-state?sku=
pub async fn get_full_state_handler(
    State(state): State<ServerState>,
    DeviceTarget(id): DeviceTarget,
) -> HandlerResult<FullStateView> {
    let device_state = state.client.get_device_state(&id).await?;
    let devices = state.client.get_devices().await?;
    ok(views::full_state_view(&id, &device_state, &devices))
}

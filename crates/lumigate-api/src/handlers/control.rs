//! Device control handlers.
//!
//! Each handler validates its body, encodes one capability and relays the
//! vendor response unchanged.

use axum::extract::State;
use serde_json::Value;

use lumigate_core::PowerState;

use super::{
    ServerState,
    common::{HandlerResult, ok},
};
use crate::models::{
    BrightnessCommand, ColorCommand, ColorTempCommand, DeviceCommand, GenericCapabilityCommand,
    InstanceCommand, MusicModeCommand, SceneCommand, SegmentBrightnessCommand,
    SegmentColorCommand, SwitchCommand, ValueCommand, WorkModeCommand, narrow_u8,
};
use crate::validator::ValidatedJson;

/// POST /devices/power
pub async fn power_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SwitchCommand>,
) -> HandlerResult<Value> {
    let power = PowerState::from(req.is_on());
    ok(state.client.set_power(&req.target.id(), power).await?)
}

/// POST /devices/power/on
pub async fn power_on_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<DeviceCommand>,
) -> HandlerResult<Value> {
    ok(state.client.turn_on(&req.id()).await?)
}

/// POST /devices/power/off
pub async fn power_off_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<DeviceCommand>,
) -> HandlerResult<Value> {
    ok(state.client.turn_off(&req.id()).await?)
}

/// POST /devices/brightness
pub async fn brightness_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<BrightnessCommand>,
) -> HandlerResult<Value> {
    let brightness = narrow_u8(req.brightness);
    ok(state.client.set_brightness(&req.target.id(), brightness).await?)
}

/// POST /devices/color
pub async fn color_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<ColorCommand>,
) -> HandlerResult<Value> {
    ok(state.client.set_color(&req.target.id(), req.rgb()).await?)
}

/// POST /devices/color-temp
pub async fn color_temp_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<ColorTempCommand>,
) -> HandlerResult<Value> {
    let kelvin = u32::try_from(req.color_temp).unwrap_or_default();
    ok(state.client.set_color_temp(&req.target.id(), kelvin).await?)
}

/// POST /devices/toggle
pub async fn toggle_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<InstanceCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_toggle(&req.target.id(), &req.instance, req.value)
        .await?)
}

/// POST /devices/gradient
pub async fn gradient_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SwitchCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_gradient_toggle(&req.target.id(), req.is_on())
        .await?)
}

/// POST /devices/segment/color
pub async fn segment_color_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SegmentColorCommand>,
) -> HandlerResult<Value> {
    let rgb = req.rgb();
    ok(state
        .client
        .set_segment_color(&req.target.id(), req.segment, rgb)
        .await?)
}

/// POST /devices/segment/brightness
pub async fn segment_brightness_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SegmentBrightnessCommand>,
) -> HandlerResult<Value> {
    let brightness = narrow_u8(req.brightness);
    ok(state
        .client
        .set_segment_brightness(&req.target.id(), req.segment, brightness)
        .await?)
}

/// POST /devices/scene
pub async fn scene_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SceneCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_scene(&req.target.id(), &req.instance, req.value)
        .await?)
}

/// POST /devices/diy-scene
pub async fn diy_scene_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<ValueCommand>,
) -> HandlerResult<Value> {
    ok(state.client.set_diy_scene(&req.target.id(), req.value).await?)
}

/// POST /devices/snapshot
pub async fn snapshot_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<ValueCommand>,
) -> HandlerResult<Value> {
    ok(state.client.set_snapshot(&req.target.id(), req.value).await?)
}

/// POST /devices/music-mode
pub async fn music_mode_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<MusicModeCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_music_mode(&req.target.id(), req.music_mode())
        .await?)
}

/// POST /devices/work-mode
pub async fn work_mode_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<WorkModeCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_work_mode(&req.target.id(), req.work_mode, req.mode_value)
        .await?)
}

/// POST /devices/range
pub async fn range_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<InstanceCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_range(&req.target.id(), &req.instance, req.value)
        .await?)
}

/// POST /devices/mode
pub async fn mode_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<InstanceCommand>,
) -> HandlerResult<Value> {
    ok(state
        .client
        .set_mode(&req.target.id(), &req.instance, req.value)
        .await?)
}

/// Forward an arbitrary capability triple.
///
/// POST /devices/control
pub async fn generic_control_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<GenericCapabilityCommand>,
) -> HandlerResult<Value> {
    let id = req.target.id();
    tracing::debug!(device = %id, kind = %req.capability_type, instance = %req.instance, "Generic control");
    ok(state
        .client
        .generic_control(&id, &req.capability_type, &req.instance, req.value)
        .await?)
}

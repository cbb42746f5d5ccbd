//! Read-model projections over vendor JSON.
//!
//! Every function here is pure: it takes an already-fetched device list or state
//! response and reshapes it. Missing or oddly-typed fields degrade to empty lists or
//! `null` rather than failing, since the vendor is the source of truth.

use serde::Serialize;
use serde_json::{Value, json};

use crate::capability::{CapabilityKind, instances};
use crate::color::Rgb;
use crate::envelope::DeviceId;

/// Find a device entry in a `user/devices` response.
pub fn find_device<'a>(devices: &'a Value, id: &DeviceId) -> Option<&'a Value> {
    devices.get("data")?.as_array()?.iter().find(|entry| {
        entry.get("device").and_then(Value::as_str) == Some(id.device.as_str())
            && entry.get("sku").and_then(Value::as_str) == Some(id.sku.as_str())
    })
}

fn capabilities_of(device: &Value) -> &[Value] {
    device
        .get("capabilities")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn is_kind(capability: &Value, kind: CapabilityKind) -> bool {
    capability.get("type").and_then(Value::as_str) == Some(kind.as_str())
}

fn field_options<'a>(capability: &'a Value, field_name: &str) -> Option<&'a [Value]> {
    let field = capability
        .pointer("/parameters/fields")?
        .as_array()?
        .iter()
        .find(|f| f.get("fieldName").and_then(Value::as_str) == Some(field_name))?;
    Some(
        field
            .get("options")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    )
}

fn named_options(options: &[Value]) -> Vec<NamedOption> {
    options
        .iter()
        .map(|opt| NamedOption {
            name: opt.get("name").cloned().unwrap_or(Value::Null),
            value: opt.get("value").cloned().unwrap_or(Value::Null),
        })
        .collect()
}

/// `{name, value}` pair from an enum-style option list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedOption {
    pub name: Value,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilitiesView {
    pub device: String,
    pub sku: String,
    pub capabilities: Vec<Value>,
}

pub fn capabilities_view(id: &DeviceId, device: &Value) -> CapabilitiesView {
    CapabilitiesView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        capabilities: capabilities_of(device).to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentsView {
    pub device: String,
    pub sku: String,
    pub segments: Vec<Value>,
    pub count: usize,
}

/// Addressable segment ids, taken from the `segment` field of the first
/// segment-color capability that declares one.
pub fn segments_view(id: &DeviceId, device: &Value) -> SegmentsView {
    let segments: Vec<Value> = capabilities_of(device)
        .iter()
        .filter(|cap| is_kind(cap, CapabilityKind::SegmentColorSetting))
        .find_map(|cap| field_options(cap, "segment"))
        .map(|options| {
            options
                .iter()
                .map(|opt| opt.get("value").cloned().unwrap_or(Value::Null))
                .collect()
        })
        .unwrap_or_default();

    SegmentsView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        count: segments.len(),
        segments,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneCatalog {
    #[serde(rename = "lightScene")]
    pub light_scene: Vec<NamedOption>,
    #[serde(rename = "diyScene")]
    pub diy_scene: Vec<NamedOption>,
    pub snapshot: Vec<NamedOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenesView {
    pub device: String,
    pub sku: String,
    pub scenes: SceneCatalog,
}

pub fn scenes_view(id: &DeviceId, device: &Value) -> ScenesView {
    let mut scenes = SceneCatalog::default();
    for cap in capabilities_of(device)
        .iter()
        .filter(|cap| is_kind(cap, CapabilityKind::DynamicScene))
    {
        let slot = match cap.get("instance").and_then(Value::as_str) {
            Some(instances::LIGHT_SCENE) => &mut scenes.light_scene,
            Some(instances::DIY_SCENE) => &mut scenes.diy_scene,
            Some(instances::SNAPSHOT) => &mut scenes.snapshot,
            _ => continue,
        };
        let options = cap
            .pointer("/parameters/options")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        *slot = named_options(options);
    }

    ScenesView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        scenes,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicModesView {
    pub device: String,
    pub sku: String,
    #[serde(rename = "musicModes")]
    pub music_modes: Vec<NamedOption>,
}

pub fn music_modes_view(id: &DeviceId, device: &Value) -> MusicModesView {
    let music_modes = capabilities_of(device)
        .iter()
        .filter(|cap| is_kind(cap, CapabilityKind::MusicSetting))
        .find_map(|cap| field_options(cap, instances::MUSIC_MODE))
        .map(named_options)
        .unwrap_or_default();

    MusicModesView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        music_modes,
    }
}

/// A decoded `colorRgb` reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorReading {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub raw: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentColorView {
    pub device: String,
    pub sku: String,
    pub online: Value,
    pub power: Option<&'static str>,
    pub brightness: Value,
    pub color: Option<ColorReading>,
    #[serde(rename = "colorTemp")]
    pub color_temp: Value,
}

/// Decode the flat capability-state list of a `device/state` response.
pub fn current_color_view(id: &DeviceId, state: &Value) -> CurrentColorView {
    let mut view = CurrentColorView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        online: Value::Bool(false),
        power: None,
        brightness: Value::Null,
        color: None,
        color_temp: Value::Null,
    };

    let capabilities = state
        .pointer("/payload/capabilities")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    for cap in capabilities {
        let value = cap.pointer("/state/value").cloned().unwrap_or(Value::Null);
        match cap.get("instance").and_then(Value::as_str) {
            Some(instances::ONLINE) => view.online = value,
            Some(instances::POWER_SWITCH) => {
                view.power = Some(if value.as_i64() == Some(1) { "on" } else { "off" });
            }
            Some(instances::BRIGHTNESS) => view.brightness = value,
            Some(instances::COLOR_RGB) => {
                view.color = value
                    .as_u64()
                    .and_then(|raw| Rgb::unpack(raw).ok().map(|rgb| (raw, rgb)))
                    .map(|(raw, rgb)| ColorReading {
                        r: rgb.r,
                        g: rgb.g,
                        b: rgb.b,
                        raw,
                    });
            }
            Some(instances::COLOR_TEMPERATURE) => view.color_temp = value,
            _ => {}
        }
    }

    view
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullStateView {
    pub device: String,
    pub sku: String,
    #[serde(rename = "deviceInfo")]
    pub device_info: Option<Value>,
    #[serde(rename = "currentState")]
    pub current_state: Value,
}

/// Merge the static device entry (if listed) with the live state payload.
pub fn full_state_view(id: &DeviceId, state: &Value, devices: &Value) -> FullStateView {
    FullStateView {
        device: id.device.clone(),
        sku: id.sku.clone(),
        device_info: find_device(devices, id).cloned(),
        current_state: state.get("payload").cloned().unwrap_or_else(|| json!({})),
    }
}

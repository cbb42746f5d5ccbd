//! Capability encoding.
//!
//! The vendor addresses every controllable behavior by a `(type, instance)` pair
//! plus a value whose schema depends on the pair. [`Capability`] enumerates the
//! pairs this gateway knows how to build; [`Capability::encode`] lowers a variant
//! to the wire triple.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::color::Rgb;

/// Capability categories (the vendor's `type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    OnOff,
    Toggle,
    Range,
    Mode,
    ColorSetting,
    SegmentColorSetting,
    MusicSetting,
    DynamicScene,
    WorkMode,
}

impl CapabilityKind {
    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnOff => "devices.capabilities.on_off",
            Self::Toggle => "devices.capabilities.toggle",
            Self::Range => "devices.capabilities.range",
            Self::Mode => "devices.capabilities.mode",
            Self::ColorSetting => "devices.capabilities.color_setting",
            Self::SegmentColorSetting => "devices.capabilities.segment_color_setting",
            Self::MusicSetting => "devices.capabilities.music_setting",
            Self::DynamicScene => "devices.capabilities.dynamic_scene",
            Self::WorkMode => "devices.capabilities.work_mode",
        }
    }
}

/// Well-known instance names.
pub mod instances {
    pub const POWER_SWITCH: &str = "powerSwitch";
    pub const BRIGHTNESS: &str = "brightness";
    pub const COLOR_RGB: &str = "colorRgb";
    pub const COLOR_TEMPERATURE: &str = "colorTemperatureK";
    pub const GRADIENT_TOGGLE: &str = "gradientToggle";
    pub const SEGMENTED_COLOR: &str = "segmentedColorRgb";
    pub const SEGMENTED_BRIGHTNESS: &str = "segmentedBrightness";
    pub const LIGHT_SCENE: &str = "lightScene";
    pub const DIY_SCENE: &str = "diyScene";
    pub const SNAPSHOT: &str = "snapshot";
    pub const MUSIC_MODE: &str = "musicMode";
    pub const WORK_MODE: &str = "workMode";
    pub const ONLINE: &str = "online";
}

/// Power switch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Off,
    On,
}

impl PowerState {
    pub fn as_value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Music-reactive mode parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicMode {
    pub music_mode: i64,
    pub sensitivity: u8,
    pub auto_color: Option<u8>,
    pub rgb: Option<Rgb>,
}

/// A single control command, one variant per supported `(type, instance)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    Power(PowerState),
    Brightness(u8),
    ColorRgb(Rgb),
    ColorTemperature(u32),
    Toggle { instance: String, value: i64 },
    SegmentColor { segments: Vec<u32>, rgb: Rgb },
    SegmentBrightness { segments: Vec<u32>, brightness: u8 },
    Scene { instance: String, value: i64 },
    DiyScene(i64),
    Snapshot(i64),
    MusicMode(MusicMode),
    WorkMode { work_mode: i64, mode_value: i64 },
    Range { instance: String, value: i64 },
    Mode { instance: String, value: i64 },
    /// Caller-supplied triple, forwarded verbatim.
    Generic { kind: String, instance: String, value: Value },
}

/// The wire form of a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub instance: String,
    pub value: Value,
}

impl CapabilityPayload {
    fn new(kind: CapabilityKind, instance: &str, value: Value) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            instance: instance.to_string(),
            value,
        }
    }
}

impl Capability {
    pub fn gradient(on: bool) -> Self {
        Self::Toggle {
            instance: instances::GRADIENT_TOGGLE.to_string(),
            value: PowerState::from(on).as_value() as i64,
        }
    }

    /// Lower to the `{type, instance, value}` triple.
    pub fn encode(&self) -> CapabilityPayload {
        use CapabilityKind as K;

        match self {
            Self::Power(state) => {
                CapabilityPayload::new(K::OnOff, instances::POWER_SWITCH, json!(state.as_value()))
            }
            Self::Brightness(level) => {
                CapabilityPayload::new(K::Range, instances::BRIGHTNESS, json!(level))
            }
            Self::ColorRgb(rgb) => {
                CapabilityPayload::new(K::ColorSetting, instances::COLOR_RGB, json!(rgb.pack()))
            }
            Self::ColorTemperature(kelvin) => CapabilityPayload::new(
                K::ColorSetting,
                instances::COLOR_TEMPERATURE,
                json!(kelvin),
            ),
            Self::Toggle { instance, value } => {
                CapabilityPayload::new(K::Toggle, instance, json!(value))
            }
            Self::SegmentColor { segments, rgb } => CapabilityPayload::new(
                K::SegmentColorSetting,
                instances::SEGMENTED_COLOR,
                json!({ "segment": segments, "rgb": rgb.pack() }),
            ),
            Self::SegmentBrightness {
                segments,
                brightness,
            } => CapabilityPayload::new(
                K::SegmentColorSetting,
                instances::SEGMENTED_BRIGHTNESS,
                json!({ "segment": segments, "brightness": brightness }),
            ),
            Self::Scene { instance, value } => {
                CapabilityPayload::new(K::DynamicScene, instance, json!(value))
            }
            Self::DiyScene(value) => {
                CapabilityPayload::new(K::DynamicScene, instances::DIY_SCENE, json!(value))
            }
            Self::Snapshot(value) => {
                CapabilityPayload::new(K::DynamicScene, instances::SNAPSHOT, json!(value))
            }
            Self::MusicMode(mode) => {
                let mut value = Map::new();
                value.insert("musicMode".into(), json!(mode.music_mode));
                value.insert("sensitivity".into(), json!(mode.sensitivity));
                if let Some(auto_color) = mode.auto_color {
                    value.insert("autoColor".into(), json!(auto_color));
                }
                if let Some(rgb) = mode.rgb {
                    value.insert("rgb".into(), json!(rgb.pack()));
                }
                CapabilityPayload::new(K::MusicSetting, instances::MUSIC_MODE, Value::Object(value))
            }
            Self::WorkMode {
                work_mode,
                mode_value,
            } => CapabilityPayload::new(
                K::WorkMode,
                instances::WORK_MODE,
                json!({ "workMode": work_mode, "modeValue": mode_value }),
            ),
            Self::Range { instance, value } => {
                CapabilityPayload::new(K::Range, instance, json!(value))
            }
            Self::Mode { instance, value } => {
                CapabilityPayload::new(K::Mode, instance, json!(value))
            }
            Self::Generic {
                kind,
                instance,
                value,
            } => CapabilityPayload {
                kind: kind.clone(),
                instance: instance.clone(),
                value: value.clone(),
            },
        }
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(capability: &Capability) -> Value {
        serde_json::to_value(capability).unwrap()
    }

    #[test]
    fn test_power_encoding() {
        assert_eq!(
            wire(&Capability::Power(PowerState::On)),
            json!({"type": "devices.capabilities.on_off", "instance": "powerSwitch", "value": 1})
        );
        assert_eq!(wire(&Capability::Power(PowerState::Off))["value"], json!(0));
    }

    #[test]
    fn test_color_encoding_packs_rgb() {
        let encoded = wire(&Capability::ColorRgb(Rgb::new(255, 0, 0)));
        assert_eq!(encoded["type"], "devices.capabilities.color_setting");
        assert_eq!(encoded["instance"], "colorRgb");
        assert_eq!(encoded["value"], json!(16711680));

        let temp = wire(&Capability::ColorTemperature(2700));
        assert_eq!(temp["instance"], "colorTemperatureK");
        assert_eq!(temp["value"], json!(2700));
    }

    #[test]
    fn test_segment_encoding() {
        let encoded = wire(&Capability::SegmentColor {
            segments: vec![0, 1, 2],
            rgb: Rgb::new(0, 0, 255),
        });
        assert_eq!(encoded["type"], "devices.capabilities.segment_color_setting");
        assert_eq!(encoded["instance"], "segmentedColorRgb");
        assert_eq!(encoded["value"], json!({"segment": [0, 1, 2], "rgb": 255}));

        let brightness = wire(&Capability::SegmentBrightness {
            segments: vec![4],
            brightness: 0,
        });
        assert_eq!(brightness["instance"], "segmentedBrightness");
        assert_eq!(brightness["value"], json!({"segment": [4], "brightness": 0}));
    }

    #[test]
    fn test_scene_family() {
        let scene = Capability::Scene {
            instance: instances::LIGHT_SCENE.into(),
            value: 42,
        };
        assert_eq!(wire(&scene)["value"], json!(42));
        assert_eq!(wire(&Capability::DiyScene(7))["instance"], "diyScene");
        assert_eq!(wire(&Capability::Snapshot(3))["instance"], "snapshot");
        assert_eq!(
            wire(&Capability::Snapshot(3))["type"],
            "devices.capabilities.dynamic_scene"
        );
    }

    #[test]
    fn test_music_mode_optional_fields() {
        let bare = wire(&Capability::MusicMode(MusicMode {
            music_mode: 1,
            sensitivity: 50,
            auto_color: None,
            rgb: None,
        }));
        assert_eq!(bare["value"], json!({"musicMode": 1, "sensitivity": 50}));

        let full = wire(&Capability::MusicMode(MusicMode {
            music_mode: 2,
            sensitivity: 80,
            auto_color: Some(0),
            rgb: Some(Rgb::new(0, 255, 0)),
        }));
        assert_eq!(
            full["value"],
            json!({"musicMode": 2, "sensitivity": 80, "autoColor": 0, "rgb": 65280})
        );
    }

    #[test]
    fn test_work_mode_and_gradient() {
        let work = wire(&Capability::WorkMode {
            work_mode: 1,
            mode_value: 3,
        });
        assert_eq!(work["value"], json!({"workMode": 1, "modeValue": 3}));

        let gradient = wire(&Capability::gradient(true));
        assert_eq!(gradient["type"], "devices.capabilities.toggle");
        assert_eq!(gradient["instance"], "gradientToggle");
        assert_eq!(gradient["value"], json!(1));
    }

    #[test]
    fn test_generic_passthrough() {
        let capability = Capability::Generic {
            kind: "devices.capabilities.temperature_setting".into(),
            instance: "targetTemperature".into(),
            value: json!({"temperature": 22, "unit": "Celsius"}),
        };
        let encoded = wire(&capability);
        assert_eq!(encoded["type"], "devices.capabilities.temperature_setting");
        assert_eq!(encoded["value"]["temperature"], 22);
    }
}

//! Request and response models for the REST surface.
//!
//! Numeric fields arrive as `i64` so that out-of-range values reach the
//! validation layer and come back as field errors instead of decode failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lumigate_core::capability::MusicMode;
use lumigate_core::{DEFAULT_CANVAS_SEGMENTS, DeviceId, Pixel, Rgb};

use crate::validator::{
    Validate, ValidationErrors, validate_not_empty, validate_range, validate_rgb,
};

pub mod error;

pub use error::ErrorResponse;

// ============================================================================
// Device addressing
// ============================================================================

/// `device` + `sku` pair carried by every control body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceIdentifier {
    pub device: String,
    pub sku: String,
}

impl DeviceIdentifier {
    pub fn id(&self) -> DeviceId {
        DeviceId::new(self.device.clone(), self.sku.clone())
    }
}

impl Validate for DeviceIdentifier {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(validate_not_empty("device", &self.device))
            .check(validate_not_empty("sku", &self.sku))
            .into_result()
    }
}

/// Query string for device-scoped GET routes.
#[derive(Debug, Clone, Deserialize)]
pub struct SkuQuery {
    pub sku: String,
}

// ============================================================================
// Whole-device commands
// ============================================================================

/// Body for routes that need nothing beyond the device address.
pub type DeviceCommand = DeviceIdentifier;

/// Power and gradient bodies: `value` is 0 or 1.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub value: i64,
}

impl SwitchCommand {
    pub fn is_on(&self) -> bool {
        self.value == 1
    }
}

impl Validate for SwitchCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_range("value", self.value, 0, 1))
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrightnessCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub brightness: i64,
}

impl Validate for BrightnessCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_range("brightness", self.brightness, 1, 100))
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl ColorCommand {
    pub fn rgb(&self) -> Rgb {
        to_rgb(self.r, self.g, self.b)
    }
}

impl Validate for ColorCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_rgb("", self.r, self.g, self.b))
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorTempCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub color_temp: i64,
}

impl Validate for ColorTempCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_range("color_temp", self.color_temp, 2000, 9000))
            .into_result()
    }
}

/// Body carrying a caller-chosen instance name and an unconstrained integer.
///
/// Shared by the toggle, range and mode routes.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub instance: String,
    pub value: i64,
}

impl Validate for InstanceCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_not_empty("instance", &self.instance))
            .into_result()
    }
}

// ============================================================================
// Segment commands
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentColorCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub segment: Vec<u32>,
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl SegmentColorCommand {
    pub fn rgb(&self) -> Rgb {
        to_rgb(self.r, self.g, self.b)
    }
}

impl Validate for SegmentColorCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_rgb("", self.r, self.g, self.b))
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentBrightnessCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub segment: Vec<u32>,
    pub brightness: i64,
}

impl Validate for SegmentBrightnessCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_range("brightness", self.brightness, 0, 100))
            .into_result()
    }
}

// ============================================================================
// Scenes and modes
// ============================================================================

fn default_scene_instance() -> String {
    lumigate_core::capability::instances::LIGHT_SCENE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    #[serde(default = "default_scene_instance")]
    pub instance: String,
    pub value: i64,
}

impl Validate for SceneCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_not_empty("instance", &self.instance))
            .into_result()
    }
}

/// DIY scene and snapshot bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub value: i64,
}

impl Validate for ValueCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.target.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MusicModeCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub music_mode: i64,
    pub sensitivity: i64,
    #[serde(default)]
    pub auto_color: Option<i64>,
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub g: Option<i64>,
    #[serde(default)]
    pub b: Option<i64>,
}

impl MusicModeCommand {
    /// Encoded settings; `rgb` is attached only when all three channels are present.
    pub fn music_mode(&self) -> MusicMode {
        let rgb = match (self.r, self.g, self.b) {
            (Some(r), Some(g), Some(b)) => Some(to_rgb(r, g, b)),
            _ => None,
        };
        MusicMode {
            music_mode: self.music_mode,
            sensitivity: clamp_u8(self.sensitivity),
            auto_color: self.auto_color.map(clamp_u8),
            rgb,
        }
    }
}

impl Validate for MusicModeCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_range("sensitivity", self.sensitivity, 0, 100));
        if let Some(auto_color) = self.auto_color {
            errors = errors.check(validate_range("auto_color", auto_color, 0, 1));
        }
        for (field, channel) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if let Some(value) = channel {
                errors = errors.check(validate_range(field, value, 0, 255));
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkModeCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub work_mode: i64,
    pub mode_value: i64,
}

impl Validate for WorkModeCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.target.validate()
    }
}

/// Generic passthrough: the capability triple is forwarded as given.
#[derive(Debug, Clone, Deserialize)]
pub struct GenericCapabilityCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub capability_type: String,
    pub instance: String,
    pub value: Value,
}

impl Validate for GenericCapabilityCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_not_empty("capability_type", &self.capability_type))
            .check(validate_not_empty("instance", &self.instance))
            .into_result()
    }
}

// ============================================================================
// Canvas
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasPixel {
    pub segment: u32,
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasDrawCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub pixels: Vec<CanvasPixel>,
}

impl CanvasDrawCommand {
    pub fn pixels(&self) -> Vec<Pixel> {
        self.pixels
            .iter()
            .map(|p| Pixel::new(p.segment, to_rgb(p.r, p.g, p.b)))
            .collect()
    }
}

impl Validate for CanvasDrawCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.pixels
            .iter()
            .enumerate()
            .fold(
                ValidationErrors::new().check(self.target.validate()),
                |errors, (i, p)| errors.check(validate_rgb(&format!("pixels[{}].", i), p.r, p.g, p.b)),
            )
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasFillCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    pub segments: Vec<u32>,
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl CanvasFillCommand {
    pub fn rgb(&self) -> Rgb {
        to_rgb(self.r, self.g, self.b)
    }
}

impl Validate for CanvasFillCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(self.target.validate())
            .check(validate_rgb("", self.r, self.g, self.b))
            .into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasClearCommand {
    #[serde(flatten)]
    pub target: DeviceIdentifier,
    #[serde(default)]
    pub num_segments: Option<i64>,
}

impl CanvasClearCommand {
    pub fn segment_count(&self) -> u32 {
        self.num_segments
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_CANVAS_SEGMENTS)
    }
}

impl Validate for CanvasClearCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new().check(self.target.validate());
        if let Some(n) = self.num_segments {
            errors = errors.check(validate_range("num_segments", n, 1, i64::from(u32::MAX)));
        }
        errors.into_result()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Narrow an already-validated channel.
fn clamp_u8(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

fn to_rgb(r: i64, g: i64, b: i64) -> Rgb {
    Rgb::new(clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

/// Narrow an already-validated value to `u8`.
pub(crate) fn narrow_u8(value: i64) -> u8 {
    clamp_u8(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flattened_target() {
        let cmd: BrightnessCommand =
            parse(json!({"device": "AA:BB", "sku": "H6199", "brightness": 40}));
        assert_eq!(cmd.target.id(), DeviceId::new("AA:BB", "H6199"));
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_brightness_bounds() {
        for (value, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let cmd: BrightnessCommand =
                parse(json!({"device": "d", "sku": "s", "brightness": value}));
            assert_eq!(cmd.validate().is_ok(), ok, "brightness {}", value);
        }
    }

    #[test]
    fn test_segment_brightness_allows_zero() {
        let cmd: SegmentBrightnessCommand =
            parse(json!({"device": "d", "sku": "s", "segment": [0], "brightness": 0}));
        assert!(cmd.validate().is_ok());
        let cmd: SegmentBrightnessCommand =
            parse(json!({"device": "d", "sku": "s", "segment": [0], "brightness": 101}));
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_color_temp_bounds() {
        for (value, ok) in [(1999, false), (2000, true), (9000, true), (9001, false)] {
            let cmd: ColorTempCommand =
                parse(json!({"device": "d", "sku": "s", "color_temp": value}));
            assert_eq!(cmd.validate().is_ok(), ok, "color_temp {}", value);
        }
    }

    #[test]
    fn test_switch_value_must_be_binary() {
        let cmd: SwitchCommand = parse(json!({"device": "d", "sku": "s", "value": 2}));
        let errors = cmd.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "value");
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let cmd: ValueCommand = parse(json!({"device": "", "sku": " ", "value": 1}));
        assert_eq!(cmd.validate().unwrap_err().errors.len(), 2);
    }

    #[test]
    fn test_scene_instance_defaults_to_light_scene() {
        let cmd: SceneCommand = parse(json!({"device": "d", "sku": "s", "value": 7}));
        assert_eq!(cmd.instance, "lightScene");
    }

    #[test]
    fn test_music_mode_rgb_needs_all_channels() {
        let partial: MusicModeCommand = parse(json!({
            "device": "d", "sku": "s", "music_mode": 1, "sensitivity": 50, "r": 10, "g": 20
        }));
        assert!(partial.music_mode().rgb.is_none());

        let full: MusicModeCommand = parse(json!({
            "device": "d", "sku": "s", "music_mode": 1, "sensitivity": 50,
            "auto_color": 0, "r": 10, "g": 20, "b": 30
        }));
        let mode = full.music_mode();
        assert_eq!(mode.rgb, Some(Rgb::new(10, 20, 30)));
        assert_eq!(mode.auto_color, Some(0));
    }

    #[test]
    fn test_music_mode_bounds() {
        let cmd: MusicModeCommand = parse(json!({
            "device": "d", "sku": "s", "music_mode": 1, "sensitivity": 101, "auto_color": 2
        }));
        let fields: Vec<_> = cmd
            .validate()
            .unwrap_err()
            .errors
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["sensitivity", "auto_color"]);
    }

    #[test]
    fn test_canvas_pixel_errors_name_the_pixel() {
        let cmd: CanvasDrawCommand = parse(json!({
            "device": "d", "sku": "s",
            "pixels": [{"segment": 0, "r": 0, "g": 0, "b": 0}, {"segment": 1, "r": 300, "g": 0, "b": 0}]
        }));
        assert_eq!(cmd.validate().unwrap_err().errors[0].field, "pixels[1].r");
    }

    #[test]
    fn test_canvas_clear_count() {
        let cmd: CanvasClearCommand = parse(json!({"device": "d", "sku": "s"}));
        assert_eq!(cmd.segment_count(), 15);
        assert!(cmd.validate().is_ok());

        let cmd: CanvasClearCommand = parse(json!({"device": "d", "sku": "s", "num_segments": 0}));
        assert!(cmd.validate().is_err());

        let cmd: CanvasClearCommand = parse(json!({"device": "d", "sku": "s", "num_segments": 4}));
        assert_eq!(cmd.segment_count(), 4);
    }
}

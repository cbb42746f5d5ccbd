//! Canvas: a device's segments treated as pixels.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Segment count assumed by a clear when the caller gives none.
pub const DEFAULT_CANVAS_SEGMENTS: u32 = 15;

/// One segment and the color it should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub segment: u32,
    pub rgb: Rgb,
}

impl Pixel {
    pub fn new(segment: u32, rgb: Rgb) -> Self {
        Self { segment, rgb }
    }
}

/// Segments that share one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGroup {
    pub rgb: Rgb,
    pub segments: Vec<u32>,
}

/// Group pixels by packed color.
///
/// Groups come out in the order their color first appears; segments keep input
/// order. A segment listed twice with the same color appears twice.
pub fn group_by_color(pixels: &[Pixel]) -> Vec<ColorGroup> {
    let mut groups: Vec<ColorGroup> = Vec::new();
    for pixel in pixels {
        match groups.iter_mut().find(|g| g.rgb.pack() == pixel.rgb.pack()) {
            Some(group) => group.segments.push(pixel.segment),
            None => groups.push(ColorGroup {
                rgb: pixel.rgb,
                segments: vec![pixel.segment],
            }),
        }
    }
    groups
}

/// Segments `0..count`.
pub fn clear_segments(count: u32) -> Vec<u32> {
    (0..count).collect()
}

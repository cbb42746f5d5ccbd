//! 24-bit RGB color packing.
//!
//! The vendor encodes colors as a single integer `0xRRGGBB`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest value a packed color may hold.
pub const MAX_PACKED: u32 = 0x00FF_FFFF;

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into `r * 65536 + g * 256 + b`.
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Inverse of [`Rgb::pack`].
    ///
    /// Accepts any integer width so values read from vendor JSON can be passed
    /// straight through; anything above `0xFFFFFF` is rejected.
    pub fn unpack(value: u64) -> Result<Self> {
        if value > MAX_PACKED as u64 {
            return Err(Error::InvalidColor(value));
        }
        let value = value as u32;
        Ok(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }
}

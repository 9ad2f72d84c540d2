//! Pixel frame and update types.
//!
//! A [`PixelFrame`] is one outbound message: a list of per-pixel color
//! updates. The dial path only ever emits single-element broadcast frames,
//! but the device also accepts targeted updates and multi-element arrays, so
//! the types model the full format.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Pixel id meaning "apply to all addressable pixels".
pub const ALL_PIXELS: i32 = -1;

// ============================================================================
// PixelUpdate
// ============================================================================

/// One per-pixel color assignment.
///
/// Channel fields serialize with the uppercase names the device firmware
/// reads (`R`, `G`, `B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelUpdate {
    /// Target pixel index, or [`ALL_PIXELS`].
    pub id: i32,

    /// Red channel.
    #[serde(rename = "R")]
    pub r: u8,

    /// Green channel.
    #[serde(rename = "G")]
    pub g: u8,

    /// Blue channel.
    #[serde(rename = "B")]
    pub b: u8,
}

impl PixelUpdate {
    /// Creates an update addressed to all pixels.
    #[inline]
    #[must_use]
    pub const fn broadcast(color: Rgb) -> Self {
        Self {
            id: ALL_PIXELS,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// Creates an update addressed to a single strip index.
    #[inline]
    #[must_use]
    pub const fn single(id: u32, color: Rgb) -> Self {
        Self {
            id: id as i32,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// Returns the update's color as an [`Rgb`] triple.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

// ============================================================================
// PixelFrame
// ============================================================================

/// One outbound message to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelFrame {
    /// Updates applied in array order by the device.
    pub pixel: Vec<PixelUpdate>,
}

impl PixelFrame {
    /// Creates a frame setting every pixel to one color.
    ///
    /// This is the only frame shape the dial path produces.
    #[inline]
    #[must_use]
    pub fn broadcast(color: Rgb) -> Self {
        Self {
            pixel: vec![PixelUpdate::broadcast(color)],
        }
    }

    /// Creates a frame targeting a single strip index.
    #[inline]
    #[must_use]
    pub fn single(id: u32, color: Rgb) -> Self {
        Self {
            pixel: vec![PixelUpdate::single(id, color)],
        }
    }

    /// Encodes the frame as the device's JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

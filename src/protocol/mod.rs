//! Wire protocol message types.
//!
//! This module defines the JSON message format understood by the lighting
//! device. Traffic is one-directional in practice: the client pushes pixel
//! frames, and anything the device sends back is treated as opaque
//! diagnostics by the transport layer.
//!
//! # Message Shape
//!
//! ```json
//! { "pixel": [ { "id": -1, "R": 255, "G": 87, "B": 51 } ] }
//! ```
//!
//! `id = -1` applies the color to every addressable pixel; a non-negative
//! `id` targets one strip index. No acknowledgement is expected or awaited.

// ============================================================================
// Submodules
// ============================================================================

/// Pixel frame and update types.
pub mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use frame::{ALL_PIXELS, PixelFrame, PixelUpdate};

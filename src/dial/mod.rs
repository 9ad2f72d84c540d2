//! The dial: intent engine and its async driver.
//!
//! [`DialCore`] is the synchronous heart: it owns the
//! [`DeviceIntent`](crate::intent::DeviceIntent), disambiguates gestures,
//! and emits frames through the wire seam. [`DialController`] is the thin
//! async driver: a spawned task that feeds the core from a command channel
//! and runs the hold timer.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Synchronous intent/gesture engine with collaborator hooks |
//! | `controller` | Spawned event loop and public input handle |

// ============================================================================
// Submodules
// ============================================================================

/// Synchronous intent/gesture engine.
pub mod core;

/// Async event loop and input handle.
pub mod controller;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::{DialController, PointerAction};
pub use core::{ChooserUi, DialCore, RenderHook};

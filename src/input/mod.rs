//! Pointer input: normalization, zone classification, gesture tracking.
//!
//! The input layer is deliberately synchronous. Events carry explicit
//! coordinates and the tracker takes explicit [`Instant`](std::time::Instant)s,
//! so every classification decision unit-tests without a canvas, a clock, or
//! a runtime. The async driver in [`dial`](crate::dial) owns the real timer.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `pointer` | Mouse/touch normalization into one event shape |
//! | `zone` | Dial geometry and the power-zone band check |
//! | `gesture` | Tap/hold state machine with a single press-timer slot |

// ============================================================================
// Submodules
// ============================================================================

/// Normalized pointer events.
pub mod pointer;

/// Dial geometry and zone classification.
pub mod zone;

/// Tap/hold gesture tracking.
pub mod gesture;

// ============================================================================
// Re-exports
// ============================================================================

pub use gesture::{GesturePhase, GestureTracker, PendingPress};
pub use pointer::{PointerEvent, SurfaceOrigin, TouchPoint};
pub use zone::{DialGeometry, Zone};

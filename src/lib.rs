//! lightdial - Tap/hold dial control for WebSocket-attached lighting devices.
//!
//! This library is the core of a color-dial UI for a small LED device: it
//! disambiguates pointer input (a sustained press toggles power and opens a
//! color chooser; a quick tap does nothing) and mirrors the resulting intent
//! to the device over a persistent, self-healing WebSocket session.
//!
//! # Architecture
//!
//! Two cooperating halves:
//!
//! - **[`transport`]**: one logical [`Session`] per device, reconnecting
//!   automatically on loss. Sends are fire-and-forget; a frame pushed while
//!   disconnected is dropped and logged, never queued.
//! - **[`dial`]**: the [`DialCore`] intent engine, driven by a
//!   [`DialController`] task. Pointer events flow in, classified against the
//!   dial geometry; intent mutations flow out as pixel frames.
//!
//! ```text
//! pointer/touch events ──► DialController ──► DialCore ──► PixelFrame
//!                                                              │
//!                          Session ◄──────────────────────────┘
//!                             │  reconnect on loss
//!                             ▼
//!                       ws://<host>/ws
//! ```
//!
//! The disambiguator is transport-agnostic: it emits frames through the
//! [`WireSink`] seam, and rendering/chooser widgets plug in as collaborator
//! hooks.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lightdial::{
//!     DeviceIntent, DialController, DialCore, InputConfig, PointerEvent, Session, SessionConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> lightdial::Result<()> {
//!     // One session per device; it reconnects on its own.
//!     let session = Arc::new(Session::open(SessionConfig::for_host("192.168.4.1")?));
//!
//!     let core = DialCore::new(
//!         DeviceIntent::new("#008c95"),
//!         InputConfig::default(),
//!         session.clone(),
//!     );
//!     let dial = DialController::spawn(core);
//!
//!     // The UI layer feeds pointer transitions as they happen.
//!     dial.pointer_down(PointerEvent::from_mouse(250.0, 300.0, 400.0, 500.0));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`color`] | RGB triples and hex decoding |
//! | [`config`] | Session and input configuration |
//! | [`dial`] | Intent engine and its async driver |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`input`] | Pointer normalization, zones, gesture tracking |
//! | [`intent`] | The device intent snapshot |
//! | [`protocol`] | Pixel frame wire types |
//! | [`transport`] | Reconnecting WebSocket session |

// ============================================================================
// Modules
// ============================================================================

/// RGB color values and hex decoding.
pub mod color;

/// Session and input configuration.
pub mod config;

/// The dial: intent engine and async driver.
pub mod dial;

/// Error types and result aliases.
pub mod error;

/// Pointer input: normalization, zones, gestures.
pub mod input;

/// The device intent snapshot.
pub mod intent;

/// Wire protocol message types.
pub mod protocol;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Color and intent
pub use color::Rgb;
pub use intent::DeviceIntent;

// Configuration
pub use config::{InputConfig, ReconnectPolicy, SessionConfig};

// Dial types
pub use dial::{ChooserUi, DialController, DialCore, PointerAction, RenderHook};

// Error types
pub use error::{Error, Result};

// Input types
pub use input::{DialGeometry, GesturePhase, PointerEvent, SurfaceOrigin, TouchPoint, Zone};

// Protocol types
pub use protocol::{ALL_PIXELS, PixelFrame, PixelUpdate};

// Transport types
pub use transport::{ConnectionState, MessageHandler, Session, WireSink};

//! Synchronous intent/gesture engine.
//!
//! `DialCore` ties the pieces together: it classifies pointer events
//! against the dial geometry, tracks the press through the gesture state
//! machine, mutates the [`DeviceIntent`] when a hold resolves or the
//! chooser reports a value, and after every mutation repaints and sends.
//!
//! Time is an explicit parameter everywhere. The core never sleeps and
//! never spawns; whoever drives it (normally
//! [`DialController`](crate::dial::DialController)) owns the real timer and
//! calls [`press_elapsed`](DialCore::press_elapsed) when the armed deadline
//! passes.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::config::InputConfig;
use crate::input::gesture::GestureTracker;
use crate::input::pointer::PointerEvent;
use crate::intent::DeviceIntent;
use crate::protocol::PixelFrame;
use crate::transport::WireSink;

// ============================================================================
// Collaborator Hooks
// ============================================================================

/// Repaint callback, invoked with the intent after every mutation.
///
/// Repainting is expected to be idempotent and fast.
pub type RenderHook = Box<dyn FnMut(&DeviceIntent) + Send>;

/// The chooser widget's placement primitives.
///
/// The value-changed direction travels the other way, through
/// [`DialCore::color_chosen`].
pub trait ChooserUi: Send {
    /// Shows the chooser at the given page coordinates.
    fn show_at(&mut self, x: f64, y: f64);

    /// Hides the chooser.
    fn hide(&mut self);
}

// ============================================================================
// DialCore
// ============================================================================

/// The intent engine behind the dial surface.
pub struct DialCore {
    intent: DeviceIntent,
    gesture: GestureTracker,
    config: InputConfig,
    sink: Arc<dyn WireSink>,
    render: Option<RenderHook>,
    chooser: Option<Box<dyn ChooserUi>>,
}

impl DialCore {
    /// Creates a core around an initial intent and a wire seam.
    #[must_use]
    pub fn new(intent: DeviceIntent, config: InputConfig, sink: Arc<dyn WireSink>) -> Self {
        Self {
            intent,
            gesture: GestureTracker::new(),
            config,
            sink,
            render: None,
            chooser: None,
        }
    }

    /// Attaches the repaint hook.
    #[must_use]
    pub fn with_render_hook(mut self, render: RenderHook) -> Self {
        self.render = Some(render);
        self
    }

    /// Attaches the chooser widget.
    #[must_use]
    pub fn with_chooser(mut self, chooser: Box<dyn ChooserUi>) -> Self {
        self.chooser = Some(chooser);
        self
    }

    /// Returns the current intent snapshot.
    #[inline]
    #[must_use]
    pub fn intent(&self) -> &DeviceIntent {
        &self.intent
    }

    /// Returns the armed hold deadline, if a press is pending.
    #[inline]
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.gesture.deadline()
    }

    /// Handles pointer-down at `now`.
    ///
    /// Hides the chooser, classifies the press, and arms the hold deadline
    /// when the press lands in the power zone. Returns the armed deadline.
    pub fn pointer_down(&mut self, event: &PointerEvent, now: Instant) -> Option<Instant> {
        if let Some(chooser) = self.chooser.as_mut() {
            chooser.hide();
        }

        let zone = self.config.geometry.classify(event.offset());
        self.gesture
            .begin(zone, event.page(), now, self.config.hold_threshold)
    }

    /// Handles pointer-up: cancels any pending press.
    ///
    /// A release before the deadline is a tap, and a tap mutates nothing.
    #[inline]
    pub fn pointer_up(&mut self) {
        self.gesture.cancel();
    }

    /// Handles the pointer leaving the surface.
    #[inline]
    pub fn pointer_leave(&mut self) {
        self.gesture.cancel();
    }

    /// Handles pointer cancellation (e.g. a system touch interruption).
    #[inline]
    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    /// Resolves the pending press if its deadline has passed.
    ///
    /// A resolved hold flips the power state, shows the chooser offset
    /// up-left from the press point, and pushes the new state to the
    /// device. Stale wakeups are ignored.
    pub fn press_elapsed(&mut self, now: Instant) {
        let Some((page_x, page_y)) = self.gesture.expire(now) else {
            return;
        };

        let powered_on = self.intent.toggle_power();
        debug!(powered_on, "hold resolved; power toggled");

        if let Some(chooser) = self.chooser.as_mut() {
            let offset = self.config.chooser_offset;
            chooser.show_at(page_x - offset, page_y - offset);
        }

        self.apply_intent_change();
    }

    /// Handles a value change reported by the chooser.
    ///
    /// Independent of the power state: while off, the new color is stored
    /// and the frame on the wire stays black.
    pub fn color_chosen(&mut self, hex: &str) {
        self.intent.set_color_hex(hex);
        debug!(color = hex, "chooser color applied");
        self.apply_intent_change();
    }

    /// Pushes the current intent as-is: one repaint, one frame.
    ///
    /// Called once at controller spawn so the device and dial reflect the
    /// initial intent (the frame is simply dropped if the session is still
    /// connecting).
    pub fn sync(&mut self) {
        self.apply_intent_change();
    }

    /// Repaints and sends after an intent mutation.
    fn apply_intent_change(&mut self) {
        if let Some(render) = self.render.as_mut() {
            render(&self.intent);
        }

        let frame = PixelFrame::broadcast(self.intent.wire_color());
        self.sink.send_frame(&frame);
    }
}

// ============================================================================
// Tests
// ============================================================================

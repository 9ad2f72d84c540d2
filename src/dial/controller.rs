//! Async event loop and input handle.
//!
//! The controller spawns one task that owns the [`DialCore`] and drives it
//! from a command channel, in arrival order. The hold timer lives here: the
//! loop sleeps on the core's armed deadline and calls back into the core
//! when it passes. Cancellation is implicit: a pointer-up clears the slot,
//! and the next loop turn simply has no deadline to sleep on.

// ============================================================================
// Imports
// ============================================================================

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::debug;

use crate::dial::core::DialCore;
use crate::input::pointer::PointerEvent;

// ============================================================================
// PointerAction
// ============================================================================

/// One raw pointer transition, as reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pointer went down at the given position.
    Down(PointerEvent),
    /// Pointer was released.
    Up,
    /// Pointer left the dial surface.
    Leave,
    /// The interaction was cancelled by the system.
    Cancel,
}

// ============================================================================
// DialCommand
// ============================================================================

/// Internal commands for the controller loop.
enum DialCommand {
    /// A pointer transition from the surface.
    Pointer(PointerAction),
    /// A value change from the chooser widget.
    ColorInput(String),
    /// Terminate the loop.
    Shutdown,
}

// ============================================================================
// DialController
// ============================================================================

/// Input handle for a running dial.
///
/// All methods are non-blocking fire-and-forget; events are processed by
/// the spawned loop in arrival order. After [`shutdown`](Self::shutdown)
/// further input is silently ignored.
pub struct DialController {
    /// Channel into the controller loop.
    command_tx: mpsc::UnboundedSender<DialCommand>,
}

impl DialController {
    /// Spawns the controller loop around a core.
    ///
    /// The core pushes its initial intent once at startup, mirroring the
    /// initial paint of the dial surface.
    #[must_use]
    pub fn spawn(core: DialCore) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_event_loop(core, command_rx));
        Self { command_tx }
    }

    /// Reports a pointer transition.
    pub fn pointer(&self, action: PointerAction) {
        let _ = self.command_tx.send(DialCommand::Pointer(action));
    }

    /// Reports pointer-down. Shorthand for [`pointer`](Self::pointer).
    #[inline]
    pub fn pointer_down(&self, event: PointerEvent) {
        self.pointer(PointerAction::Down(event));
    }

    /// Reports pointer-up.
    #[inline]
    pub fn pointer_up(&self) {
        self.pointer(PointerAction::Up);
    }

    /// Reports a chooser value change.
    pub fn color_input(&self, hex: impl Into<String>) {
        let _ = self.command_tx.send(DialCommand::ColorInput(hex.into()));
    }

    /// Terminates the controller loop.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(DialCommand::Shutdown);
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Drives the core until shutdown.
async fn run_event_loop(mut core: DialCore, mut command_rx: mpsc::UnboundedReceiver<DialCommand>) {
    core.sync();

    loop {
        let deadline = core.pending_deadline();

        tokio::select! {
            command = command_rx.recv() => {
                match command {
                    Some(DialCommand::Pointer(PointerAction::Down(event))) => {
                        core.pointer_down(&event, Instant::now());
                    }
                    Some(DialCommand::Pointer(PointerAction::Up)) => core.pointer_up(),
                    Some(DialCommand::Pointer(PointerAction::Leave)) => core.pointer_leave(),
                    Some(DialCommand::Pointer(PointerAction::Cancel)) => core.pointer_cancel(),
                    Some(DialCommand::ColorInput(hex)) => core.color_chosen(&hex),
                    Some(DialCommand::Shutdown) | None => break,
                }
            }

            () = hold_timer(deadline) => {
                core.press_elapsed(Instant::now());
            }
        }
    }

    debug!("dial event loop terminated");
}

/// Sleeps until the armed deadline; pends forever when none is armed.
async fn hold_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        None => std::future::pending().await,
    }
}

// ============================================================================
// Tests
// ============================================================================

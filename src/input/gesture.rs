//! Tap/hold gesture tracking.
//!
//! One [`GestureTracker`] disambiguates a single pointer interaction: a
//! press inside the power zone arms a one-shot hold deadline; releasing
//! before the deadline is a tap and mutates nothing; reaching the deadline
//! while still pressing resolves the interaction as a hold.
//!
//! The pending press is a single `Option` slot. Beginning a press always
//! overwrites it, so at most one deadline is armed at any time.

// ============================================================================
// Imports
// ============================================================================

use std::time::{Duration, Instant};

use crate::input::zone::Zone;

// ============================================================================
// GesturePhase
// ============================================================================

/// Lifecycle of one pointer-down-to-pointer-up interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No interaction in progress.
    #[default]
    Idle,
    /// Pointer is down inside the power zone, deadline armed.
    Pressing,
    /// The hold deadline fired; the interaction already took effect.
    Resolved,
}

// ============================================================================
// PendingPress
// ============================================================================

/// An armed hold deadline and the press's page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPress {
    /// When the press resolves into a hold.
    pub deadline: Instant,
    /// Page coordinates of the press, kept for chooser placement.
    pub page: (f64, f64),
}

// ============================================================================
// GestureTracker
// ============================================================================

/// Tap/hold state machine with a single press-timer slot.
#[derive(Debug, Default)]
pub struct GestureTracker {
    phase: GesturePhase,
    press: Option<PendingPress>,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Returns the armed deadline, if a press is pending.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.press.map(|p| p.deadline)
    }

    /// Begins a new interaction at `now`.
    ///
    /// Any previously armed press is discarded first. A press inside the
    /// power zone arms a deadline `threshold` from now and returns it;
    /// anywhere else leaves the tracker idle.
    pub fn begin(
        &mut self,
        zone: Zone,
        page: (f64, f64),
        now: Instant,
        threshold: Duration,
    ) -> Option<Instant> {
        self.press = None;
        match zone {
            Zone::Power => {
                let deadline = now + threshold;
                self.phase = GesturePhase::Pressing;
                self.press = Some(PendingPress { deadline, page });
                Some(deadline)
            }
            Zone::Outside => {
                self.phase = GesturePhase::Idle;
                None
            }
        }
    }

    /// Ends the interaction without resolving it (pointer up/leave/cancel).
    #[inline]
    pub fn cancel(&mut self) {
        self.press = None;
        self.phase = GesturePhase::Idle;
    }

    /// Fires the armed deadline if it has been reached.
    ///
    /// Returns the press's page coordinates when the interaction resolves
    /// as a hold. A stale wakeup (no press armed, or the armed deadline is
    /// still in the future) returns `None` and changes nothing.
    pub fn expire(&mut self, now: Instant) -> Option<(f64, f64)> {
        match self.press {
            Some(press) if self.phase == GesturePhase::Pressing && press.deadline <= now => {
                self.press = None;
                self.phase = GesturePhase::Resolved;
                Some(press.page)
            }
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_millis(500);

    #[test]
    fn test_press_in_power_zone_arms_deadline() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        let deadline = tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        assert_eq!(deadline, Some(t0 + THRESHOLD));
        assert_eq!(tracker.phase(), GesturePhase::Pressing);
    }

    #[test]
    fn test_press_outside_stays_idle() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        assert_eq!(tracker.begin(Zone::Outside, (0.0, 0.0), t0, THRESHOLD), None);
        assert_eq!(tracker.phase(), GesturePhase::Idle);
        assert_eq!(tracker.deadline(), None);
    }

    #[test]
    fn test_release_before_deadline_is_a_tap() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        tracker.cancel();
        assert_eq!(tracker.phase(), GesturePhase::Idle);

        // The timer task may still wake up; the slot is gone.
        assert_eq!(tracker.expire(t0 + THRESHOLD), None);
    }

    #[test]
    fn test_hold_resolves_at_deadline() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        assert_eq!(tracker.expire(t0 + Duration::from_millis(300)), None);
        assert_eq!(tracker.expire(t0 + THRESHOLD), Some((100.0, 200.0)));
        assert_eq!(tracker.phase(), GesturePhase::Resolved);
        assert_eq!(tracker.deadline(), None);
    }

    #[test]
    fn test_hold_resolves_only_once() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        assert!(tracker.expire(t0 + THRESHOLD).is_some());
        assert_eq!(tracker.expire(t0 + THRESHOLD), None);
    }

    #[test]
    fn test_new_press_overwrites_pending_slot() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(200);

        tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        tracker.begin(Zone::Power, (110.0, 210.0), t1, THRESHOLD);
        assert_eq!(tracker.deadline(), Some(t1 + THRESHOLD));

        // The first press's deadline passing must not resolve anything.
        assert_eq!(tracker.expire(t0 + THRESHOLD), None);
        assert_eq!(tracker.expire(t1 + THRESHOLD), Some((110.0, 210.0)));
    }

    #[test]
    fn test_press_outside_clears_pending_slot() {
        let mut tracker = GestureTracker::new();
        let t0 = Instant::now();

        tracker.begin(Zone::Power, (100.0, 200.0), t0, THRESHOLD);
        tracker.begin(Zone::Outside, (0.0, 0.0), t0, THRESHOLD);
        assert_eq!(tracker.deadline(), None);
        assert_eq!(tracker.expire(t0 + THRESHOLD), None);
    }
}

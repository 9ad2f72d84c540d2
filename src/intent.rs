//! The device intent snapshot.
//!
//! [`DeviceIntent`] is the single source of truth for what the device should
//! display. It is created once with the chooser's default color and mutated
//! only by the dial core in response to classified gestures.
//!
//! The wire color is a pure function of the snapshot: the decoded hex when
//! powered on, black when powered off. The stored hex is never cleared by a
//! power toggle, so the chooser value survives a power cycle.

// ============================================================================
// Imports
// ============================================================================

use crate::color::Rgb;

// ============================================================================
// DeviceIntent
// ============================================================================

/// The power/color state the UI wants the device to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIntent {
    /// Whether the device should be emitting light.
    powered_on: bool,
    /// 6-hex-digit color string, effective only while powered on.
    color_hex: String,
}

impl DeviceIntent {
    /// Creates an intent with the chooser's default color, powered off.
    #[inline]
    pub fn new(default_hex: impl Into<String>) -> Self {
        Self {
            powered_on: false,
            color_hex: default_hex.into(),
        }
    }

    /// Returns whether the device should be emitting light.
    #[inline]
    #[must_use]
    pub fn powered_on(&self) -> bool {
        self.powered_on
    }

    /// Returns the stored chooser color.
    #[inline]
    #[must_use]
    pub fn color_hex(&self) -> &str {
        &self.color_hex
    }

    /// Flips the power state and returns the new value.
    #[inline]
    pub fn toggle_power(&mut self) -> bool {
        self.powered_on = !self.powered_on;
        self.powered_on
    }

    /// Replaces the stored chooser color.
    #[inline]
    pub fn set_color_hex(&mut self, hex: impl Into<String>) {
        self.color_hex = hex.into();
    }

    /// Computes the color to put on the wire.
    ///
    /// `powered_on ? decode(color_hex) : black`. Malformed hex decodes to
    /// black rather than failing.
    #[must_use]
    pub fn wire_color(&self) -> Rgb {
        if self.powered_on {
            Rgb::parse_lossy(&self.color_hex)
        } else {
            Rgb::BLACK
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_powered_off() {
        let intent = DeviceIntent::new("#ff5733");
        assert!(!intent.powered_on());
        assert_eq!(intent.color_hex(), "#ff5733");
    }

    #[test]
    fn test_wire_color_is_black_while_off() {
        let intent = DeviceIntent::new("#ff5733");
        assert_eq!(intent.wire_color(), Rgb::BLACK);
    }

    #[test]
    fn test_wire_color_decodes_hex_while_on() {
        let mut intent = DeviceIntent::new("#ff5733");
        assert!(intent.toggle_power());
        assert_eq!(intent.wire_color(), Rgb::new(255, 87, 51));
    }

    #[test]
    fn test_toggle_is_a_toggle() {
        let mut intent = DeviceIntent::new("#ff5733");
        assert!(intent.toggle_power());
        assert!(!intent.toggle_power());
        assert!(intent.toggle_power());
    }

    #[test]
    fn test_color_survives_power_cycle() {
        let mut intent = DeviceIntent::new("#008c95");
        intent.toggle_power();
        intent.set_color_hex("#00ff00");
        intent.toggle_power();
        assert_eq!(intent.wire_color(), Rgb::BLACK);
        intent.toggle_power();
        assert_eq!(intent.wire_color(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_malformed_hex_fails_closed() {
        let mut intent = DeviceIntent::new("oops");
        intent.toggle_power();
        assert_eq!(intent.wire_color(), Rgb::BLACK);
    }
}

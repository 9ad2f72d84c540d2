//! Normalized pointer events.
//!
//! Mouse and touch sources arrive with different shapes; both normalize to
//! one [`PointerEvent`] before classification. Touch sources use the first
//! active touch point, with offsets computed against the dial surface's
//! bounding origin.

// ============================================================================
// PointerEvent
// ============================================================================

/// A pointer interaction, normalized across mouse and touch.
///
/// `offset_*` is relative to the dial surface; `page_*` is absolute page
/// coordinates, kept for positioning the chooser near the press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Horizontal offset within the dial surface.
    pub offset_x: f64,
    /// Vertical offset within the dial surface.
    pub offset_y: f64,
    /// Absolute horizontal page coordinate.
    pub page_x: f64,
    /// Absolute vertical page coordinate.
    pub page_y: f64,
}

impl PointerEvent {
    /// Creates an event from mouse coordinates, which already carry offsets.
    #[inline]
    #[must_use]
    pub const fn from_mouse(offset_x: f64, offset_y: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            page_x,
            page_y,
        }
    }

    /// Creates an event from a touch list, using the first active touch.
    ///
    /// Returns `None` when the list is empty (e.g. a bare `touchend`).
    #[must_use]
    pub fn from_touches(touches: &[TouchPoint], surface: SurfaceOrigin) -> Option<Self> {
        let touch = touches.first()?;
        Some(Self {
            offset_x: touch.client_x - surface.left,
            offset_y: touch.client_y - surface.top,
            page_x: touch.page_x,
            page_y: touch.page_y,
        })
    }

    /// Returns the offset coordinates as a pair.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Returns the page coordinates as a pair.
    #[inline]
    #[must_use]
    pub const fn page(&self) -> (f64, f64) {
        (self.page_x, self.page_y)
    }
}

// ============================================================================
// TouchPoint
// ============================================================================

/// One active touch as reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Horizontal position in viewport coordinates.
    pub client_x: f64,
    /// Vertical position in viewport coordinates.
    pub client_y: f64,
    /// Horizontal position in page coordinates.
    pub page_x: f64,
    /// Vertical position in page coordinates.
    pub page_y: f64,
}

// ============================================================================
// SurfaceOrigin
// ============================================================================

/// The dial surface's bounding origin in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceOrigin {
    /// Left edge of the surface.
    pub left: f64,
    /// Top edge of the surface.
    pub top: f64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_passthrough() {
        let ev = PointerEvent::from_mouse(120.0, 310.0, 400.0, 500.0);
        assert_eq!(ev.offset(), (120.0, 310.0));
        assert_eq!(ev.page(), (400.0, 500.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let touches = [
            TouchPoint {
                client_x: 180.0,
                client_y: 350.0,
                page_x: 180.0,
                page_y: 950.0,
            },
            TouchPoint {
                client_x: 10.0,
                client_y: 10.0,
                page_x: 10.0,
                page_y: 610.0,
            },
        ];
        let surface = SurfaceOrigin {
            left: 60.0,
            top: 40.0,
        };

        let ev = PointerEvent::from_touches(&touches, surface).expect("first touch");
        assert_eq!(ev.offset(), (120.0, 310.0));
        assert_eq!(ev.page(), (180.0, 950.0));
    }

    #[test]
    fn test_empty_touch_list() {
        assert_eq!(
            PointerEvent::from_touches(&[], SurfaceOrigin::default()),
            None
        );
    }
}

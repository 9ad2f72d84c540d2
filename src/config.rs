//! Session and input configuration.
//!
//! Both timing constants of the original device UI live here as defaults:
//! the 2000 ms reconnect delay and the 500 ms hold threshold. Everything is
//! a plain struct with `with_*` builders.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lightdial::{InputConfig, ReconnectPolicy, SessionConfig};
//!
//! let session = SessionConfig::for_host("192.168.4.1")
//!     .expect("valid host")
//!     .with_reconnect(ReconnectPolicy::fixed(Duration::from_secs(5)));
//! assert_eq!(session.endpoint(), "ws://192.168.4.1/ws");
//!
//! let input = InputConfig::default().with_hold_threshold(Duration::from_millis(350));
//! assert_eq!(input.hold_threshold, Duration::from_millis(350));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::input::zone::DialGeometry;

// ============================================================================
// Constants
// ============================================================================

/// Default delay between a connection loss and the next attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(2000);

/// Default press duration that resolves an interaction as a hold.
pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(500);

/// Default chooser placement offset from the press point, in pixels.
pub const DEFAULT_CHOOSER_OFFSET: f64 = 50.0;

// ============================================================================
// ReconnectPolicy
// ============================================================================

/// Retry schedule for a lost connection.
///
/// The default is an unconditional fixed delay, sized for a device on a
/// local, generally reliable network. [`with_backoff`](Self::with_backoff)
/// turns on doubling up to a cap for deployments where hammering a dead
/// endpoint matters. Attempts are unbounded either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Base delay before the next attempt.
    delay: Duration,
    /// Backoff cap; `None` means every gap equals `delay`.
    max_backoff: Option<Duration>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy {
    /// Creates a fixed-delay policy.
    #[inline]
    #[must_use]
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_backoff: None,
        }
    }

    /// Enables exponential backoff, capped at `max_backoff`.
    #[inline]
    #[must_use]
    pub const fn with_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = Some(max_backoff);
        self
    }

    /// Returns the gap to wait before attempt `attempt` (zero-based count
    /// of consecutive failures).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.max_backoff {
            None => self.delay,
            Some(cap) => {
                let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor).min(cap)
            }
        }
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Transport session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    endpoint: String,
    reconnect: ReconnectPolicy,
}

impl SessionConfig {
    /// Creates a config for an explicit WebSocket endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if the URL does not parse or its scheme
    /// is not `ws` or `wss`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        let url = Url::parse(&endpoint).map_err(|e| Error::endpoint(e.to_string()))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::endpoint(format!(
                "expected ws:// or wss:// scheme, got {}://",
                url.scheme()
            )));
        }

        Ok(Self {
            endpoint,
            reconnect: ReconnectPolicy::default(),
        })
    }

    /// Creates a config for the device's standard endpoint on `host`:
    /// `ws://<host>/ws`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if `host` does not form a valid URL.
    pub fn for_host(host: &str) -> Result<Self> {
        if host.is_empty() {
            return Err(Error::endpoint("host must not be empty"));
        }
        Self::new(format!("ws://{host}/ws"))
    }

    /// Replaces the reconnect policy.
    #[inline]
    #[must_use]
    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the reconnect policy.
    #[inline]
    #[must_use]
    pub fn reconnect(&self) -> ReconnectPolicy {
        self.reconnect
    }
}

// ============================================================================
// InputConfig
// ============================================================================

/// Input disambiguation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    /// Press duration that resolves an interaction as a hold.
    pub hold_threshold: Duration,

    /// Chooser placement offset from the press point, in pixels, applied
    /// up and to the left. No viewport clamping is performed.
    pub chooser_offset: f64,

    /// Dial dimensions used for zone classification.
    pub geometry: DialGeometry,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_threshold: DEFAULT_HOLD_THRESHOLD,
            chooser_offset: DEFAULT_CHOOSER_OFFSET,
            geometry: DialGeometry::default(),
        }
    }
}

impl InputConfig {
    /// Sets the hold threshold.
    #[inline]
    #[must_use]
    pub const fn with_hold_threshold(mut self, threshold: Duration) -> Self {
        self.hold_threshold = threshold;
        self
    }

    /// Sets the chooser placement offset.
    #[inline]
    #[must_use]
    pub const fn with_chooser_offset(mut self, offset: f64) -> Self {
        self.chooser_offset = offset;
        self
    }

    /// Sets the dial geometry.
    #[inline]
    #[must_use]
    pub const fn with_geometry(mut self, geometry: DialGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_host_endpoint() {
        let config = SessionConfig::for_host("192.168.4.1").expect("valid host");
        assert_eq!(config.endpoint(), "ws://192.168.4.1/ws");
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(SessionConfig::for_host("").is_err());
    }

    #[test]
    fn test_non_ws_scheme_rejected() {
        let err = SessionConfig::new("http://192.168.4.1/ws").unwrap_err();
        assert!(matches!(err, Error::Endpoint { .. }));
    }

    #[test]
    fn test_unparseable_endpoint_rejected() {
        assert!(SessionConfig::new("not a url").is_err());
    }

    #[test]
    fn test_default_reconnect_is_fixed_2s() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(0), DEFAULT_RECONNECT_DELAY);
        assert_eq!(policy.delay_for(7), DEFAULT_RECONNECT_DELAY);
    }

    #[test]
    fn test_backoff_doubles_to_cap() {
        let policy =
            ReconnectPolicy::fixed(Duration::from_secs(1)).with_backoff(Duration::from_secs(30));
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(4), Duration::from_secs(16));
        assert_eq!(policy.delay_for(5), Duration::from_secs(30));
        assert_eq!(policy.delay_for(60), Duration::from_secs(30));
    }

    #[test]
    fn test_input_defaults() {
        let config = InputConfig::default();
        assert_eq!(config.hold_threshold, DEFAULT_HOLD_THRESHOLD);
        assert_eq!(config.chooser_offset, DEFAULT_CHOOSER_OFFSET);
        assert_eq!(config.geometry.power_band(), (275.0, 400.0));
    }
}

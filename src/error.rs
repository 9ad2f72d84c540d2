//! Error types for lightdial.
//!
//! This module defines all error types used throughout the crate.
//!
//! Almost nothing in this subsystem is fatal: transport failures are absorbed
//! at the [`Session`](crate::transport::Session) boundary, logged, and healed
//! by reconnection. The errors below surface only at construction time
//! (invalid endpoint) or at encoding seams.
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Endpoint`] |
//! | Connection | [`Error::Connection`] |
//! | External | [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid device endpoint.
    ///
    /// Returned when the configured endpoint URL does not parse or does not
    /// use a WebSocket scheme.
    #[error("Invalid endpoint: {message}")]
    Endpoint {
        /// Description of the endpoint problem.
        message: String,
    },

    /// Connection to the device failed.
    ///
    /// Produced inside the session loop when a connect attempt fails; it is
    /// logged there and never propagated to callers.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an endpoint error.
    #[inline]
    pub fn endpoint(message: impl Into<String>) -> Self {
        Self::Endpoint {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection-level error.
    ///
    /// Connection-level errors are transient: the session retries them.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::WebSocket(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::endpoint("bad scheme");
        assert_eq!(err.to_string(), "Invalid endpoint: bad scheme");

        let err = Error::connection("refused");
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::connection("refused").is_connection_error());
        assert!(!Error::endpoint("bad scheme").is_connection_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}

//! Error types for the ADCP client
//!
//! Internal plumbing propagates `AdcpError`; the public engine surface
//! collapses it into `bool`/`Option` and keeps the `FailureKind` around
//! for diagnostics.

use std::fmt;

use thiserror::Error;

/// Result type alias using AdcpError
pub type Result<T> = std::result::Result<T, AdcpError>;

/// Unified error type for ADCP operations
#[derive(Debug, Error)]
pub enum AdcpError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {reason}")]
    ConnectFailed { addr: String, reason: String },

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Cannot connect to projector at {host}:{port}")]
    CannotConnect { host: String, port: u16 },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Projector returned {0}")]
    Protocol(String),

    #[error("Unexpected response: {0}")]
    ParseMismatch(String),

    #[error("Line is not 7-bit ASCII: {0}")]
    Encoding(String),

    #[error("Line too long: {len} bytes (max {max})")]
    LineTooLong { len: usize, max: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdcpError {
    /// Classify this error into the coarse taxonomy reported to callers
    pub fn kind(&self) -> FailureKind {
        match self {
            AdcpError::ConnectFailed { .. } | AdcpError::CannotConnect { .. } => {
                FailureKind::Connect
            }
            AdcpError::AuthFailed(_) => FailureKind::Auth,
            AdcpError::Protocol(token) => FailureKind::Protocol(error_reason(token).to_string()),
            AdcpError::ParseMismatch(_) => FailureKind::ParseMismatch,
            AdcpError::Config(_) => FailureKind::Config,
            AdcpError::Io(_)
            | AdcpError::Timeout(_)
            | AdcpError::NotConnected
            | AdcpError::Encoding(_)
            | AdcpError::LineTooLong { .. } => FailureKind::Io,
        }
    }
}

/// Why the most recent operation did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// TCP connect or handshake did not complete
    Connect,

    /// Handshake completed but the result token was not `OK`
    Auth,

    /// Write/read error or timeout mid-command
    Io,

    /// `err_*` response; holds the reason after the prefix (e.g. `invalid_value`)
    Protocol(String),

    /// Response did not have the shape the getter expected
    ParseMismatch,

    /// Invalid connection settings
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Connect => write!(f, "connect failure"),
            FailureKind::Auth => write!(f, "authentication failure"),
            FailureKind::Io => write!(f, "I/O failure"),
            FailureKind::Protocol(reason) => write!(f, "protocol error ({})", reason),
            FailureKind::ParseMismatch => write!(f, "unexpected response"),
            FailureKind::Config => write!(f, "configuration error"),
        }
    }
}

fn error_reason(token: &str) -> &str {
    token.strip_prefix(crate::protocol::ERROR_PREFIX).unwrap_or(token)
}

//! # sony-adcp
//!
//! An async client for Sony's ADCP projector control protocol with:
//! - One persistent TCP session per projector
//! - SHA-256 challenge-response authentication
//! - Strictly serialized command/response exchanges
//! - Reconnect on the next call after any I/O failure
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Host application                         │
//! │           (UI, polling scheduler, service calls)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  typed get/set → Option / bool
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   ProtocolEngine                             │
//! │          (command lock, one exchange in flight)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Handshake  │          │   Session   │
//!   │  (SHA-256)  │─────────▶│ (CRLF I/O)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  Projector  │
//!                           │ (TCP 53595) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AdcpError, FailureKind, Result};
pub use config::Config;
pub use engine::ProtocolEngine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sony-adcp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

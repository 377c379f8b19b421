//! Network Module
//!
//! TCP session handling for the client side.
//!
//! ## Architecture
//! - One `Session` per engine, owned through `SessionState`
//! - Handshake runs once right after the TCP connect
//! - All reads and writes are bounded by the configured timeout

mod session;
pub mod auth;

pub use session::{Session, SessionState};
pub use auth::{auth_digest, authenticate, Challenge};

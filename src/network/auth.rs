//! Authentication handshake
//!
//! Runs once per connection, before any command:
//!
//! ```text
//!   projector                       client
//!   ─────────                       ──────
//!   challenge line  ───────────▶
//!                   ◀───────────    sha256(nonce + password)   (nonce only)
//!   "OK" / other    ───────────▶                               (nonce only)
//! ```

use sha2::{Digest, Sha256};

use super::Session;
use crate::config::Config;
use crate::error::{AdcpError, Result};

/// Challenge sent when authentication is disabled on the projector
pub const NO_KEY: &str = "NOKEY";

/// Successful authentication result
pub const AUTH_OK: &str = "OK";

/// Prefix of an identification banner that needs no answer
pub const BANNER_PREFIX: &str = "PJLINK";

/// First line sent by the projector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Challenge {
    /// `NOKEY`: authentication disabled
    NoKey,

    /// Blank line
    Empty,

    /// Identification banner, accepted as already authenticated
    Banner(String),

    /// Random nonce to be hashed with the password
    Nonce(String),
}

impl Challenge {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == NO_KEY {
            Challenge::NoKey
        } else if line.is_empty() {
            Challenge::Empty
        } else if line.starts_with(BANNER_PREFIX) {
            Challenge::Banner(line.to_string())
        } else {
            Challenge::Nonce(line.to_string())
        }
    }
}

/// Lowercase hex SHA-256 of `nonce` immediately followed by `password`
pub fn auth_digest(nonce: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Perform the handshake on a freshly opened session
///
/// Returns `AuthFailed` when the projector rejects the digest. The caller
/// owns closing the session on any error.
pub async fn authenticate(session: &mut Session, config: &Config) -> Result<()> {
    let challenge = Challenge::parse(&session.read_line().await?);

    match challenge {
        Challenge::NoKey => {
            tracing::debug!("Authentication disabled on projector");
            Ok(())
        }
        Challenge::Empty => {
            tracing::debug!("Empty challenge from {}, continuing", session.peer_addr());
            Ok(())
        }
        Challenge::Banner(banner) => {
            tracing::debug!("Identification banner {:?}, continuing without authentication", banner);
            Ok(())
        }
        Challenge::Nonce(_) if !config.use_auth => {
            tracing::debug!("Nonce challenge ignored, authentication disabled in config");
            Ok(())
        }
        Challenge::Nonce(nonce) => {
            session
                .write_line(&auth_digest(&nonce, &config.password))
                .await?;

            let result = session.read_line().await?;
            if result != AUTH_OK {
                return Err(AdcpError::AuthFailed(result));
            }
            tracing::debug!("Authenticated with {}", session.peer_addr());
            Ok(())
        }
    }
}

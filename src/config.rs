//! Configuration for a projector connection
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdcpError, Result};

/// Default ADCP TCP port
pub const DEFAULT_PORT: u16 = 53595;

/// Factory default ADCP password
pub const DEFAULT_PASSWORD: &str = "Projector";

/// Default bound on connect and on every read (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for one projector
///
/// Immutable once handed to a `ProtocolEngine`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Projector hostname or IP address
    #[serde(default)]
    pub host: String,

    /// ADCP TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bound on TCP connect and on every line read/write (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Authentication Configuration
    // -------------------------------------------------------------------------
    /// Password combined with the projector's nonce
    #[serde(default = "default_password")]
    pub password: String,

    /// Answer nonce challenges with a digest
    #[serde(default = "default_use_auth")]
    pub use_auth: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_use_auth() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            password: DEFAULT_PASSWORD.to_string(),
            use_auth: true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_ms", &self.timeout_ms)
            .field("password", &"<redacted>")
            .field("use_auth", &self.use_auth)
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form used for connecting and logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject settings that can never produce a working session
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AdcpError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(AdcpError::Config("port must not be 0".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(AdcpError::Config("timeout must be positive".to_string()));
        }
        if !self.password.is_ascii() {
            return Err(AdcpError::Config("password must be ASCII".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the projector host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the ADCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the authentication password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Enable or disable answering nonce challenges
    pub fn use_auth(mut self, use_auth: bool) -> Self {
        self.config.use_auth = use_auth;
        self
    }

    /// Set the I/O timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

//! Engine Module
//!
//! The protocol engine that owns one projector connection.
//!
//! ## Responsibilities
//! - Open the TCP session and run the authentication handshake
//! - Serialize command/response exchanges on the single session
//! - Tear the session down on any I/O failure so the next call reconnects
//! - Wrap the generic exchange in typed get/set operations
//!
//! ## Failure contract
//! No operation returns an error. `connect` and setters report `false`,
//! getters report `None`, and callers treat either as "unknown, retry
//! later". `last_failure()` tells why the most recent operation failed.
//! Keeping the last known value on `None` is the caller's policy; the
//! engine never caches projector state.

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

use crate::config::Config;
use crate::error::{AdcpError, FailureKind, Result};
use crate::network::{authenticate, Session, SessionState};
use crate::protocol::{parse_number, parse_quoted, Command, PowerStatus, Response};

/// Lower bound applied by `step_numeric_value`
pub const STEP_MIN: i64 = 0;

/// Upper bound applied by `step_numeric_value`
pub const STEP_MAX: i64 = 100;

/// Client-side ADCP protocol engine
///
/// ## Concurrency Model: one exchange in flight
///
/// The wire protocol has no request identifiers, so a second command
/// written before the first reply is read would shift every later reply
/// onto the wrong caller. `state` is therefore locked for the whole
/// write-then-read exchange, including any reconnect it triggers.
/// Concurrent callers queue on the lock in arrival order.
///
/// Share an engine between tasks with `Arc<ProtocolEngine>`; each
/// configured projector owns exactly one engine.
pub struct ProtocolEngine {
    /// Connection settings
    config: Config,

    /// Session state, also the command lock
    state: AsyncMutex<SessionState>,

    /// Why the most recent operation failed, if it did
    last_failure: Mutex<Option<FailureKind>>,
}

impl ProtocolEngine {
    /// Create an engine in the `Disconnected` state
    ///
    /// No I/O happens until `connect` or the first command.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: AsyncMutex::new(SessionState::Disconnected),
            last_failure: Mutex::new(None),
        }
    }

    /// Check that `config` is usable and that the projector accepts a session
    ///
    /// Distinguishes an unreachable or rejecting projector
    /// (`AdcpError::CannotConnect`) from bad settings (`AdcpError::Config`).
    pub async fn validate(config: &Config) -> Result<()> {
        config.validate()?;

        let engine = Self::new(config.clone());
        if !engine.connect().await {
            return Err(AdcpError::CannotConnect {
                host: config.host.clone(),
                port: config.port,
            });
        }
        engine.disconnect().await;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a session is currently open
    ///
    /// Waits for any in-flight exchange to finish.
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.is_connected()
    }

    /// Why the most recent operation failed; `None` after a success
    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure.lock().clone()
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Open a session and authenticate
    ///
    /// Replaces any session already open. Returns `false` on timeout,
    /// refusal, I/O error or rejected authentication, leaving the engine
    /// disconnected.
    pub async fn connect(&self) -> bool {
        let mut state = self.state.lock().await;
        self.connect_locked(&mut state).await
    }

    /// Close the session if one is open
    ///
    /// Idempotent; close-time errors are logged, never returned.
    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        state.close().await;
    }

    async fn connect_locked(&self, state: &mut SessionState) -> bool {
        state.close().await;

        match self.open_session().await {
            Ok(session) => {
                tracing::info!(
                    "Connected to Sony projector at {}",
                    session.peer_addr()
                );
                *state = SessionState::Connected(session);
                self.clear_failure();
                true
            }
            Err(e) => {
                tracing::error!("Error connecting to projector at {}: {}", self.config.addr(), e);
                self.record_failure(&e);
                false
            }
        }
    }

    async fn open_session(&self) -> Result<Session> {
        let mut session = Session::open(&self.config).await?;

        match authenticate(&mut session, &self.config).await {
            Ok(()) => Ok(session),
            Err(e) => {
                session.close().await;
                Err(match e {
                    AdcpError::AuthFailed(_) => e,
                    other => AdcpError::ConnectFailed {
                        addr: self.config.addr(),
                        reason: format!("handshake: {}", other),
                    },
                })
            }
        }
    }

    // =========================================================================
    // Command Dispatch
    // =========================================================================

    /// Send one command line and return the raw reply line
    ///
    /// Connects first if needed. Returns `None` if the connect fails, the
    /// exchange fails (the session is then closed so the next call
    /// reconnects), or the projector answers with an `err_*` token.
    pub async fn send_command(&self, command: &str) -> Option<String> {
        let mut state = self.state.lock().await;

        if !state.is_connected() && !self.connect_locked(&mut state).await {
            return None;
        }

        match Self::exchange(&mut state, command).await {
            Ok(response) if Response::parse(&response).is_error() => {
                tracing::error!("Command error: {} for command: {}", response, command);
                self.record_failure(&AdcpError::Protocol(response));
                None
            }
            Ok(response) => {
                self.clear_failure();
                Some(response)
            }
            Err(e) => {
                tracing::error!("Error sending command {}: {}", command, e);
                self.record_failure(&e);
                state.close().await;
                None
            }
        }
    }

    /// Send a typed command
    pub async fn execute(&self, command: &Command) -> Option<String> {
        self.send_command(&command.to_line()).await
    }

    async fn exchange(state: &mut SessionState, command: &str) -> Result<String> {
        let session = state.session_mut()?;

        session.write_line(command).await?;
        tracing::debug!("Sent command: {}", command);

        let response = session.read_line().await?;
        tracing::debug!("Received response: {}", response);

        Ok(response)
    }

    // =========================================================================
    // Typed Operations
    // =========================================================================

    /// Raw power status token (`standby`, `startup`, `on`, `cooling1`, `cooling2`)
    pub async fn get_power_status(&self) -> Option<String> {
        self.query_string("power_status").await
    }

    /// Power status as an enum
    pub async fn get_power_state(&self) -> Option<PowerStatus> {
        self.get_power_status()
            .await
            .map(|token| PowerStatus::from_token(&token))
    }

    pub async fn set_power(&self, on: bool) -> bool {
        self.set_string("power", on_off(on)).await
    }

    /// Current input source key (e.g. `hdmi1`)
    pub async fn get_input(&self) -> Option<String> {
        self.query_string("input").await
    }

    pub async fn set_input(&self, source: &str) -> bool {
        self.set_string("input", source).await
    }

    /// Whether the picture is blanked (video mute)
    pub async fn get_blank_status(&self) -> Option<bool> {
        self.query_string("blank").await.map(|value| value == "on")
    }

    pub async fn set_blank(&self, on: bool) -> bool {
        self.set_string("blank", on_off(on)).await
    }

    /// Current picture mode key (e.g. `cinema_film1`)
    pub async fn get_picture_mode(&self) -> Option<String> {
        self.query_string("picture_mode").await
    }

    pub async fn set_picture_mode(&self, mode: &str) -> bool {
        self.set_string("picture_mode", mode).await
    }

    /// Read a numeric parameter such as `brightness`
    pub async fn get_numeric_value(&self, name: &str) -> Option<i64> {
        let response = self.execute(&Command::query(name)).await?;
        let value = parse_number(&response);
        if value.is_none() {
            self.parse_mismatch(name, &response);
        }
        value
    }

    pub async fn set_numeric_value(&self, name: &str, value: i64) -> bool {
        self.set(&Command::set_number(name, value)).await
    }

    /// Read `name`, add `delta`, clamp to 0..=100 and write it back
    ///
    /// Returns the value written. Nothing is cached: the current value is
    /// always read from the projector first.
    pub async fn step_numeric_value(&self, name: &str, delta: i64) -> Option<i64> {
        let current = self.get_numeric_value(name).await?;
        let target = current.saturating_add(delta).clamp(STEP_MIN, STEP_MAX);

        if self.set_numeric_value(name, target).await {
            Some(target)
        } else {
            None
        }
    }

    /// Simulate a remote-control key press
    pub async fn send_key(&self, key: &str) -> bool {
        self.set(&Command::key(key)).await
    }

    /// Reality Creation state (`on`/`off`)
    pub async fn get_reality_creation(&self) -> Option<String> {
        self.query_string("real_cre").await
    }

    pub async fn set_reality_creation(&self, state: &str) -> bool {
        self.set_string("real_cre", state).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn query_string(&self, name: &str) -> Option<String> {
        let response = self.execute(&Command::query(name)).await?;
        match parse_quoted(&response) {
            Some(value) => Some(value.to_string()),
            None => {
                self.parse_mismatch(name, &response);
                None
            }
        }
    }

    async fn set_string(&self, name: &str, value: &str) -> bool {
        self.set(&Command::set_string(name, value)).await
    }

    async fn set(&self, command: &Command) -> bool {
        match self.execute(command).await {
            Some(response) if Response::parse(&response).is_ok() => true,
            Some(response) => {
                self.parse_mismatch(command.name(), &response);
                false
            }
            None => false,
        }
    }

    fn parse_mismatch(&self, name: &str, response: &str) {
        tracing::warn!("Unexpected response for {}: {}", name, response);
        self.record_failure(&AdcpError::ParseMismatch(response.to_string()));
    }

    fn record_failure(&self, error: &AdcpError) {
        *self.last_failure.lock() = Some(error.kind());
    }

    fn clear_failure(&self) {
        *self.last_failure.lock() = None;
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

//! Session
//!
//! The live TCP connection to one projector and its line I/O.

use std::mem;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::config::Config;
use crate::error::{AdcpError, Result};
use crate::protocol::{read_line, write_line};

/// Initial capacity of the read buffer; replies are short
const READ_BUFFER_CAPACITY: usize = 256;

/// An open connection
pub struct Session {
    /// Read half with its line buffer
    reader: OwnedReadHalf,
    buffer: BytesMut,

    /// Write half
    writer: OwnedWriteHalf,

    /// Bound on every read and write
    timeout: Duration,

    /// Peer address for logging
    peer_addr: String,
}

impl Session {
    /// Open a TCP connection to the configured projector
    ///
    /// The connect itself is bounded by the configured timeout.
    pub async fn open(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let timeout = config.timeout();

        let stream = match tokio::time::timeout(timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(AdcpError::ConnectFailed {
                    addr,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(AdcpError::ConnectFailed {
                    addr,
                    reason: format!("timed out after {} ms", config.timeout_ms),
                })
            }
        };

        // Disable Nagle's algorithm; every exchange is a single short line
        stream.set_nodelay(true)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        let (reader, writer) = stream.into_split();

        tracing::debug!("TCP connection established to {}", peer_addr);

        Ok(Self {
            reader,
            buffer: BytesMut::with_capacity(READ_BUFFER_CAPACITY),
            writer,
            timeout,
            peer_addr,
        })
    }

    /// Read the next line, terminator and surrounding whitespace stripped
    pub async fn read_line(&mut self) -> Result<String> {
        match tokio::time::timeout(self.timeout, read_line(&mut self.reader, &mut self.buffer)).await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Timeout reading from {}", self.peer_addr);
                Err(AdcpError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    /// Write `text` followed by CR LF and flush
    pub async fn write_line(&mut self, text: &str) -> Result<()> {
        match tokio::time::timeout(self.timeout, write_line(&mut self.writer, text)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Timeout writing to {}", self.peer_addr);
                Err(AdcpError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    /// Close the write side, wait for the shutdown, then drop the read side
    ///
    /// Close-time errors are logged and swallowed; the peer may already be gone.
    pub async fn close(mut self) {
        match tokio::time::timeout(self.timeout, self.writer.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Error closing connection to {}: {}", self.peer_addr, e),
            Err(_) => tracing::debug!("Timeout closing connection to {}", self.peer_addr),
        }
        drop(self.reader);
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Connection state of an engine
///
/// The live handles only exist in `Connected`.
#[derive(Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected(Session),
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected(_))
    }

    /// Borrow the live session, or fail with `NotConnected`
    pub fn session_mut(&mut self) -> Result<&mut Session> {
        match self {
            SessionState::Connected(session) => Ok(session),
            SessionState::Disconnected => Err(AdcpError::NotConnected),
        }
    }

    /// Transition to `Disconnected`, closing the session if there is one
    ///
    /// Idempotent.
    pub async fn close(&mut self) {
        if let SessionState::Connected(session) = mem::take(self) {
            session.close().await;
        }
    }
}

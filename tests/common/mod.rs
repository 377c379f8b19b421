//! In-process mock projector shared by the integration tests.
//!
//! Listens on 127.0.0.1:0, sends a scripted challenge, checks digests
//! against its own password, then answers each command line through a
//! handler closure. Everything it receives is recorded.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sony_adcp::network::auth_digest;
use sony_adcp::Config;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the mock does with one command line
pub enum Reply {
    /// Send this line back (CR LF appended)
    Line(String),

    /// Drop the connection without answering
    Close,

    /// Answer nothing and keep the connection open
    Silent,
}

impl Reply {
    pub fn line(text: impl Into<String>) -> Self {
        Reply::Line(text.into())
    }
}

type Handler = dyn Fn(usize, &str) -> Reply + Send + Sync;

pub struct MockProjectorBuilder {
    challenge: Option<String>,
    expect_digest: bool,
    password: String,
    reply_delay: Duration,
    handler: Arc<Handler>,
}

impl MockProjectorBuilder {
    /// Send a nonce and expect a digest answer
    pub fn nonce(mut self, nonce: &str) -> Self {
        self.challenge = Some(nonce.to_string());
        self.expect_digest = true;
        self
    }

    /// Send this challenge line and go straight to commands
    pub fn challenge(mut self, line: &str) -> Self {
        self.challenge = Some(line.to_string());
        self.expect_digest = false;
        self
    }

    /// Accept connections but never send a challenge
    pub fn no_challenge(mut self) -> Self {
        self.challenge = None;
        self.expect_digest = false;
        self
    }

    /// Password the mock checks digests against
    pub fn password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Wait this long before each reply, watching for pipelined commands
    pub fn reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Answer commands; receives the 1-based connection number and the line
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize, &str) -> Reply + Send + Sync + 'static,
    {
        self.handler = Arc::new(handler);
        self
    }

    pub async fn start(self) -> MockProjector {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState::default());
        let script = Arc::new(self);

        let accept_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };
                let connection = accept_state.connections.fetch_add(1, Ordering::SeqCst) + 1;
                let state = Arc::clone(&accept_state);
                let script = Arc::clone(&script);
                tokio::spawn(async move {
                    serve(stream, connection, script, state).await;
                });
            }
        });

        MockProjector {
            addr,
            state,
            handle,
        }
    }
}

#[derive(Default)]
struct MockState {
    connections: AtomicUsize,
    received: Mutex<Vec<String>>,
    digests: Mutex<Vec<String>>,
    pipelined: AtomicBool,
}

pub struct MockProjector {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockProjector {
    pub fn builder() -> MockProjectorBuilder {
        MockProjectorBuilder {
            challenge: Some("NOKEY".to_string()),
            expect_digest: false,
            password: "Projector".to_string(),
            reply_delay: Duration::ZERO,
            handler: Arc::new(|_, _| Reply::line("ok")),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Client config pointing at this mock with a short timeout
    pub fn config(&self) -> Config {
        Config::builder()
            .host("127.0.0.1")
            .port(self.addr.port())
            .timeout_ms(2_000)
            .build()
    }

    /// Number of accepted TCP connections so far
    pub fn connections(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    /// Command lines received, in order, across all connections
    pub fn received(&self) -> Vec<String> {
        self.state.received.lock().clone()
    }

    /// Digest lines received during handshakes
    pub fn digests(&self) -> Vec<String> {
        self.state.digests.lock().clone()
    }

    /// Whether a command ever arrived before the previous reply was sent
    pub fn saw_pipelining(&self) -> bool {
        self.state.pipelined.load(Ordering::SeqCst)
    }
}

impl Drop for MockProjector {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    stream: tokio::net::TcpStream,
    connection: usize,
    script: Arc<MockProjectorBuilder>,
    state: Arc<MockState>,
) {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    if let Some(challenge) = &script.challenge {
        if send(&mut writer, challenge).await.is_err() {
            return;
        }

        if script.expect_digest {
            let digest = match next_line(&mut reader).await {
                Some(line) => line,
                None => return,
            };
            state.digests.lock().push(digest.clone());

            let result = if digest == auth_digest(challenge, &script.password) {
                "OK"
            } else {
                "err_auth"
            };
            if send(&mut writer, result).await.is_err() || result != "OK" {
                return;
            }
        }
    }

    loop {
        let line = match next_line(&mut reader).await {
            Some(line) => line,
            None => return,
        };
        state.received.lock().push(line.clone());

        if !reader.buffer().is_empty() {
            state.pipelined.store(true, Ordering::SeqCst);
        }
        if !script.reply_delay.is_zero() {
            if let Ok(Ok(buf)) = tokio::time::timeout(script.reply_delay, reader.fill_buf()).await {
                if !buf.is_empty() {
                    state.pipelined.store(true, Ordering::SeqCst);
                }
            }
        }

        match (script.handler)(connection, &line) {
            Reply::Line(reply) => {
                if send(&mut writer, &reply).await.is_err() {
                    return;
                }
            }
            Reply::Close => return,
            Reply::Silent => {}
        }
    }
}

async fn next_line(reader: &mut BufReader<tokio::net::tcp::OwnedReadHalf>) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

async fn send(writer: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await
}

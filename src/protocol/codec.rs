//! Protocol codec
//!
//! Line framing for the wire protocol. These are the only functions that
//! touch raw bytes; everything above works with `&str`.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────┬──────────┐
//! │     payload (7-bit ASCII, no CR/LF)     │ 0x0D 0x0A│
//! └─────────────────────────────────────────┴──────────┘
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{AdcpError, Result};

/// Line terminator used in both directions
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Maximum buffered bytes without a terminator (64 KB)
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

// =============================================================================
// Line Encoding/Decoding
// =============================================================================

/// Encode a line for sending
///
/// Format: ASCII payload + CR LF. Non-ASCII text or an embedded line
/// break is rejected, since either would desynchronize the exchange.
pub fn encode_line(text: &str) -> Result<Bytes> {
    if !text.is_ascii() {
        return Err(AdcpError::Encoding(text.escape_default().to_string()));
    }
    if text.bytes().any(|b| b == b'\r' || b == b'\n') {
        return Err(AdcpError::Encoding(format!(
            "embedded line break in {:?}",
            text
        )));
    }

    let mut message = BytesMut::with_capacity(text.len() + LINE_TERMINATOR.len());
    message.put_slice(text.as_bytes());
    message.put_slice(LINE_TERMINATOR);
    Ok(message.freeze())
}

/// Decode one line from the front of `buffer`
///
/// Returns `Ok(None)` when no complete line is buffered yet. On success the
/// line and its terminator are consumed, and the text is returned with
/// surrounding whitespace stripped.
pub fn decode_line(buffer: &mut BytesMut) -> Result<Option<String>> {
    let end = match buffer
        .windows(LINE_TERMINATOR.len())
        .position(|window| window == LINE_TERMINATOR)
    {
        Some(end) => end,
        None => {
            if buffer.len() > MAX_LINE_LENGTH {
                return Err(AdcpError::LineTooLong {
                    len: buffer.len(),
                    max: MAX_LINE_LENGTH,
                });
            }
            return Ok(None);
        }
    };

    if end > MAX_LINE_LENGTH {
        return Err(AdcpError::LineTooLong {
            len: end,
            max: MAX_LINE_LENGTH,
        });
    }

    let payload = buffer.split_to(end);
    buffer.advance(LINE_TERMINATOR.len());

    if !payload.is_ascii() {
        return Err(AdcpError::Encoding(
            String::from_utf8_lossy(&payload).escape_default().to_string(),
        ));
    }

    let text = String::from_utf8_lossy(&payload);
    Ok(Some(text.trim().to_string()))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete line from a stream
///
/// Bytes past the terminator stay in `buffer` for the next call.
/// A peer that closes mid-line yields `UnexpectedEof`.
pub async fn read_line<R>(reader: &mut R, buffer: &mut BytesMut) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    loop {
        if let Some(line) = decode_line(buffer)? {
            return Ok(line);
        }

        let read = reader.read_buf(buffer).await?;
        if read == 0 {
            return Err(AdcpError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed by projector",
            )));
        }
    }
}

/// Write a line to a stream and flush it
pub async fn write_line<W>(writer: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = encode_line(text)?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

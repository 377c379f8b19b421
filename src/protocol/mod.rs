//! Protocol Module
//!
//! Defines the ADCP wire protocol: one ASCII line per request, one per reply.
//!
//! ## Line Format
//! ```text
//! ┌─────────────────────────────────────────┬──────────┐
//! │         7-bit ASCII text                │  CR LF   │
//! └─────────────────────────────────────────┴──────────┘
//! ```
//!
//! ### Commands
//! - `<name> ?`          - query
//! - `<name> "<value>"`  - string set
//! - `<name> <integer>`  - numeric set
//! - `key "<keyname>"`   - remote-key simulate
//!
//! ### Responses
//! - `ok`                - set succeeded
//! - `"<string>"`        - string query result
//! - `<integer>`         - numeric query result (optionally signed)
//! - `err_<reason>`      - device-side error

mod command;
mod response;
mod codec;
pub mod params;

pub use command::Command;
pub use response::{parse_number, parse_quoted, Response};
pub use codec::{decode_line, encode_line, read_line, write_line, LINE_TERMINATOR, MAX_LINE_LENGTH};
pub use params::{NumericParameter, PowerStatus, RemoteKey, INPUT_SOURCES, PICTURE_MODES};

/// Response to a successful set command
pub const RESPONSE_OK: &str = "ok";

/// Prefix of every device-side error token
pub const ERROR_PREFIX: &str = "err_";

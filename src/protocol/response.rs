//! Response definitions
//!
//! Classifies a reply line by shape. The engine hands raw lines to the
//! typed operations, which use these helpers to pull out their value.

use super::{ERROR_PREFIX, RESPONSE_OK};

/// A reply line, classified by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `ok`
    Ok,

    /// `"<string>"` with the quotes removed
    Text(String),

    /// Digit sequence, optionally preceded by a single `-`
    Number(i64),

    /// `err_<reason>`, full token kept
    Error(String),

    /// Anything else
    Other(String),
}

impl Response {
    /// Classify a line that has already been stripped of its terminator
    pub fn parse(line: &str) -> Self {
        if line == RESPONSE_OK {
            return Response::Ok;
        }
        if line.starts_with(ERROR_PREFIX) {
            return Response::Error(line.to_string());
        }
        if let Some(text) = parse_quoted(line) {
            return Response::Text(text.to_string());
        }
        if let Some(number) = parse_number(line) {
            return Response::Number(number);
        }
        Response::Other(line.to_string())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

/// Strip the surrounding double quotes of a string result
///
/// Returns `None` unless the line both starts and ends with `"`.
pub fn parse_quoted(line: &str) -> Option<&str> {
    if line.starts_with('"') && line.ends_with('"') {
        Some(line.trim_matches('"'))
    } else {
        None
    }
}

/// Parse a numeric result
///
/// Every character must be an ASCII digit, optionally preceded by one `-`.
/// A leading `+`, whitespace or an out-of-range value yields `None`.
pub fn parse_number(line: &str) -> Option<i64> {
    let digits = line.strip_prefix('-').unwrap_or(line);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    line.parse().ok()
}

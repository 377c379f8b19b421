//! Command definitions
//!
//! Outbound ADCP lines, built per call and discarded.

use std::fmt;

/// An outbound command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a value: `<name> ?`
    Query { name: String },

    /// Set a string value: `<name> "<value>"`
    SetString { name: String, value: String },

    /// Set a numeric value: `<name> <value>`
    SetNumber { name: String, value: i64 },
}

impl Command {
    pub fn query(name: impl Into<String>) -> Self {
        Command::Query { name: name.into() }
    }

    pub fn set_string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Command::SetString {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn set_number(name: impl Into<String>, value: i64) -> Self {
        Command::SetNumber {
            name: name.into(),
            value,
        }
    }

    /// Simulate a remote-control key press: `key "<key>"`
    pub fn key(key: impl Into<String>) -> Self {
        Command::set_string("key", key)
    }

    /// Parameter name the command addresses
    pub fn name(&self) -> &str {
        match self {
            Command::Query { name }
            | Command::SetString { name, .. }
            | Command::SetNumber { name, .. } => name,
        }
    }

    /// Render the command as it goes on the wire (without terminator)
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Query { name } => write!(f, "{} ?", name),
            Command::SetString { name, value } => write!(f, "{} \"{}\"", name, value),
            Command::SetNumber { name, value } => write!(f, "{} {}", name, value),
        }
    }
}

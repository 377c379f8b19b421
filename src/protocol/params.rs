//! Parameter catalogs
//!
//! Known tokens for the commands the engine wraps. The engine itself takes
//! plain `&str`, so tokens missing here still go through.

use std::fmt;

/// Input source key → display name
pub const INPUT_SOURCES: &[(&str, &str)] = &[("hdmi1", "HDMI 1"), ("hdmi2", "HDMI 2")];

/// Picture mode key → display name
pub const PICTURE_MODES: &[(&str, &str)] = &[
    ("cinema_film1", "Cinema Film 1"),
    ("cinema_film2", "Cinema Film 2"),
    ("reference", "Reference"),
    ("tv", "TV"),
    ("photo", "Photo"),
    ("game", "Game"),
    ("brt_cinema", "Bright Cinema"),
    ("brt_tv", "Bright TV"),
    ("user1", "User 1"),
    ("user2", "User 2"),
    ("user3", "User 3"),
];

/// Display name for a catalog key
pub fn display_name(catalog: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, name)| *name)
}

/// Catalog key for a display name
pub fn key_for_name(catalog: &[(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    catalog.iter().find(|(_, n)| *n == name).map(|(key, _)| *key)
}

/// Power status as reported by `power_status ?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerStatus {
    Standby,
    Startup,
    On,
    Cooling1,
    Cooling2,
    Unknown(String),
}

impl PowerStatus {
    pub fn from_token(token: &str) -> Self {
        match token {
            "standby" => PowerStatus::Standby,
            "startup" => PowerStatus::Startup,
            "on" => PowerStatus::On,
            "cooling1" => PowerStatus::Cooling1,
            "cooling2" => PowerStatus::Cooling2,
            other => PowerStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            PowerStatus::Standby => "standby",
            PowerStatus::Startup => "startup",
            PowerStatus::On => "on",
            PowerStatus::Cooling1 => "cooling1",
            PowerStatus::Cooling2 => "cooling2",
            PowerStatus::Unknown(token) => token,
        }
    }

    /// Whether the projector counts as on (warming up or lit)
    pub fn is_on(&self) -> bool {
        matches!(self, PowerStatus::Startup | PowerStatus::On)
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Adjustable numeric picture values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericParameter {
    Brightness,
    Contrast,
    Sharpness,
    LightOutput,
}

impl NumericParameter {
    pub const ALL: [NumericParameter; 4] = [
        NumericParameter::Brightness,
        NumericParameter::Contrast,
        NumericParameter::Sharpness,
        NumericParameter::LightOutput,
    ];

    /// Name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            NumericParameter::Brightness => "brightness",
            NumericParameter::Contrast => "contrast",
            NumericParameter::Sharpness => "sharpness",
            NumericParameter::LightOutput => "light_output_val",
        }
    }
}

impl AsRef<str> for NumericParameter {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// Remote-control keys accepted by `key "<key>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Menu,
    Reset,
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl RemoteKey {
    pub fn name(&self) -> &'static str {
        match self {
            RemoteKey::Menu => "menu",
            RemoteKey::Reset => "reset",
            RemoteKey::Up => "up",
            RemoteKey::Down => "down",
            RemoteKey::Left => "left",
            RemoteKey::Right => "right",
            RemoteKey::Enter => "enter",
        }
    }
}

impl AsRef<str> for RemoteKey {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

//! Crate-level error types.

use std::fmt;

/// Errors produced by the touchrig crate.
///
/// Stale pointer events and partially-null orientation samples are not
/// errors; they are absorbed where they arrive.
#[derive(Debug)]
pub enum RigError {
    /// The platform rejected the orientation-sensor permission request.
    PermissionDenied(String),
    /// No orientation sensor (or permission API) on this platform.
    SensorUnavailable(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Host surface failure (event loop, window, DOM listener).
    Platform(String),
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied(msg) => {
                write!(f, "sensor permission denied: {msg}")
            }
            Self::SensorUnavailable(msg) => {
                write!(f, "orientation sensor unavailable: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for RigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

//! Error types for Mouse Profiles
//!
//! Domain errors use thiserror so callers can match on the failure kind.
//! Application edges (CLI, GUI startup) wrap these in anyhow.

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::speed;

#[derive(Error, Debug)]
pub enum PointerSpeedError {
    #[error("Pointer speed {0} is outside {min}..={max}", min = speed::MIN, max = speed::MAX)]
    InvalidArgument(u32),

    #[error("Unable to get mouse speed: {0}")]
    PlatformQuery(String),

    #[error("Unable to set mouse speed: {0}")]
    PlatformUpdate(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse settings file {}: {source}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings file I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a user action routed through the profile controller
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    PointerSpeed(#[from] PointerSpeedError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message_names_range() {
        let err = PointerSpeedError::InvalidArgument(25);
        assert_eq!(err.to_string(), "Pointer speed 25 is outside 1..=20");
    }

    #[test]
    fn test_controller_error_is_transparent() {
        let err = ControllerError::from(PointerSpeedError::PlatformUpdate("access denied".into()));
        assert_eq!(err.to_string(), "Unable to set mouse speed: access denied");
    }
}

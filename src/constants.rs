//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Settings file location
pub mod config {
    /// Application directory name (created under the user config directory)
    pub const APP_DIR: &str = "MouseProfiles";

    /// Settings filename
    pub const FILENAME: &str = "settings.json";
}

/// Pointer speed limits accepted by the OS
pub mod speed {
    /// Slowest pointer speed
    pub const MIN: u32 = 1;

    /// Fastest pointer speed
    pub const MAX: u32 = 20;

    /// Windows out-of-box pointer speed, used to seed `--simulate`
    pub const DEFAULT: u32 = 10;
}

/// Toast notification defaults
pub mod toast {
    /// Time the toast stays fully opaque
    pub const HOLD_MS: u64 = 3000;

    /// Duration of the fade-out
    pub const FADE_MS: u64 = 500;

    /// Distance from the right edge of the work area
    pub const MARGIN_X: f32 = 10.0;

    /// Distance from the bottom edge of the work area
    pub const MARGIN_Y: f32 = 10.0;

    pub const WIDTH: f32 = 300.0;
    pub const HEIGHT: f32 = 80.0;

    pub const MINIMIZED_TITLE: &str = "Mouse Profiles";
    pub const MINIMIZED_MESSAGE: &str = "Mouse Profiles is still running in the background.";
}

/// Tray icon strings
#[cfg(windows)]
pub mod tray {
    pub const TOOLTIP: &str = "Mouse Profiles";
    pub const OPEN_LABEL: &str = "Open";
    pub const EXIT_LABEL: &str = "Exit";
}

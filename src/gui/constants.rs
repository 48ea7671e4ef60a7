//! GUI-specific constants for layout and status colors

use egui;

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 260.0;

/// Layout spacing
pub const PADDING: f32 = 8.0;
pub const SECTION_SPACING: f32 = 12.0;
pub const ITEM_SPACING: f32 = 6.0;

/// Width reserved for the speed slider
pub const SLIDER_WIDTH: f32 = 200.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const ACTIVE_BADGE: egui::Color32 = egui::Color32::from_rgb(0, 120, 215);

/// Toast colors (faded by multiplying with the current opacity)
pub const TOAST_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(32, 32, 36);
pub const TOAST_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 240, 240);
pub const TOAST_CORNER_RADIUS: u8 = 8;
pub const TOAST_INNER_MARGIN: i8 = 12;

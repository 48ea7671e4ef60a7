//! Desktop shell: main window, toasts and (on Windows) the tray icon

pub mod app;
pub mod components;
pub mod constants;
pub mod icon;
pub mod shell;
#[cfg(windows)]
pub mod tray;

pub use app::{GuiOptions, run_gui};

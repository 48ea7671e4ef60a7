//! Window lifecycle decisions: hide to tray, restore, really exit
//!
//! The rules only track flags, so they are tested directly; the app sends
//! the commands from [`ShellAction::viewport_commands`].

use eframe::egui::ViewportCommand;
use tracing::{debug, info};

/// Requests coming from the tray icon or its menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    Open,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// Nothing to do
    None,
    /// Cancel any pending close, hide the window, optionally toast
    HideToTray { notify: bool },
    /// Show, un-minimize and focus the window
    Restore,
    /// Let the pending close go through
    AllowClose,
    /// Start closing the window for real
    Exit,
}

impl ShellAction {
    /// Commands for the root viewport, in the order they must be sent
    ///
    /// A window hidden to the tray is minimized first. eframe keeps running
    /// `update` for minimized windows on Windows, which tray events and toast
    /// repaints depend on while nothing is visible.
    pub fn viewport_commands(self) -> Vec<ViewportCommand> {
        match self {
            ShellAction::None | ShellAction::AllowClose => Vec::new(),
            ShellAction::HideToTray { .. } => vec![
                ViewportCommand::CancelClose,
                ViewportCommand::Minimized(true),
                ViewportCommand::Visible(false),
            ],
            ShellAction::Restore => vec![
                ViewportCommand::Visible(true),
                ViewportCommand::Minimized(false),
                ViewportCommand::Focus,
            ],
            ShellAction::Exit => vec![ViewportCommand::Close],
        }
    }
}

#[derive(Debug)]
pub struct ShellState {
    tray_available: bool,
    exiting: bool,
    hidden: bool,
    was_minimized: bool,
}

impl ShellState {
    pub fn new(tray_available: bool) -> Self {
        Self {
            tray_available,
            exiting: false,
            hidden: false,
            was_minimized: false,
        }
    }

    /// Start in the tray instead of showing the window (ignored without a tray)
    pub fn start_hidden(&mut self) -> bool {
        self.hidden = self.tray_available;
        self.hidden
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    fn hide(&mut self, notifications_disabled: bool) -> ShellAction {
        let notify = !self.hidden && !notifications_disabled;
        self.hidden = true;
        info!(notify, "Hiding window to tray");
        ShellAction::HideToTray { notify }
    }

    pub fn close_requested(&mut self, notifications_disabled: bool) -> ShellAction {
        if self.exiting || !self.tray_available {
            info!("Closing main window");
            return ShellAction::AllowClose;
        }
        self.hide(notifications_disabled)
    }

    /// Feed the window's minimized flag every frame; acts on the rising edge only
    pub fn observe_minimized(&mut self, minimized: bool, notifications_disabled: bool) -> ShellAction {
        let rising = minimized && !self.was_minimized;
        self.was_minimized = minimized;

        if !rising || !self.tray_available || self.hidden {
            return ShellAction::None;
        }
        self.hide(notifications_disabled)
    }

    pub fn tray_command(&mut self, command: TrayCommand) -> ShellAction {
        debug!(?command, "Tray command");
        match command {
            TrayCommand::Open => {
                self.hidden = false;
                ShellAction::Restore
            }
            TrayCommand::Exit => {
                info!("Exit requested from tray menu");
                self.exiting = true;
                ShellAction::Exit
            }
        }
    }
}

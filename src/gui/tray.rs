//! Windows notification-area icon with an Open/Exit menu

use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use eframe::egui;
use tracing::{debug, info};
use tray_icon::{
    Icon, MouseButton, TrayIcon, TrayIconBuilder, TrayIconEvent,
    menu::{Menu, MenuEvent, MenuItem},
};

use super::icon::load_app_icon;
use super::shell::TrayCommand;
use crate::constants::tray;

/// Keeps the icon alive; dropping it removes the icon from the tray
pub struct Tray {
    _icon: TrayIcon,
}

impl Tray {
    /// Build the tray icon and route its events to the returned channel
    ///
    /// Each event also wakes the UI, which may be hidden at the time.
    pub fn create(ctx: &egui::Context) -> Result<(Self, Receiver<TrayCommand>)> {
        let rgba = load_app_icon()?;
        let icon = Icon::from_rgba(rgba.rgba, rgba.width, rgba.height)
            .context("Failed to create icon from RGBA data")?;

        let menu = Menu::new();
        let open_item = MenuItem::new(tray::OPEN_LABEL, true, None);
        let exit_item = MenuItem::new(tray::EXIT_LABEL, true, None);
        menu.append(&open_item)
            .context("Failed to append open menu item")?;
        menu.append(&exit_item)
            .context("Failed to append exit menu item")?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_tooltip(tray::TOOLTIP)
            .with_icon(icon)
            .build()
            .context("Failed to build tray icon")?;

        let (tx, rx) = mpsc::channel();

        let open_id = open_item.id().clone();
        let exit_id = exit_item.id().clone();
        let menu_tx = tx.clone();
        let menu_ctx = ctx.clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            let command = if event.id == open_id {
                TrayCommand::Open
            } else if event.id == exit_id {
                TrayCommand::Exit
            } else {
                return;
            };
            let _ = menu_tx.send(command);
            menu_ctx.request_repaint();
        }));

        let icon_ctx = ctx.clone();
        TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
            if let TrayIconEvent::DoubleClick { button: MouseButton::Left, .. } = event {
                debug!("Tray icon double-clicked");
                let _ = tx.send(TrayCommand::Open);
                icon_ctx.request_repaint();
            }
        }));

        info!("Tray icon created");
        Ok((Self { _icon: tray_icon }, rx))
    }
}

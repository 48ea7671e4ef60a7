//! Main window implemented with egui/eframe, hiding to a tray icon on Windows

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info, warn};

use super::components::{profile_panel, toast_view};
use super::constants::*;
use super::icon::load_app_icon;
use super::shell::{ShellAction, ShellState, TrayCommand};
use crate::constants::toast as toast_text;
use crate::error::ControllerError;
use crate::pointer_speed::PointerSpeedPort;
use crate::profile::{ProfileController, ProfileId};
use crate::toast::{ToastId, ToastOptions, ToastQueue};

/// Launch settings coming from the command line
#[derive(Debug, Clone, Default)]
pub struct GuiOptions {
    pub start_minimized: bool,
    pub toast: ToastOptions,
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub type Controller = ProfileController<Box<dyn PointerSpeedPort>>;

struct MouseProfilesApp {
    controller: Controller,
    shell: ShellState,
    toasts: ToastQueue,
    last_toast: Option<ToastId>,
    tray_events: Option<Receiver<TrayCommand>>,
    #[cfg(windows)]
    tray: Option<super::tray::Tray>,
    status_message: Option<StatusMessage>,
}

impl MouseProfilesApp {
    fn new(cc: &CreationContext<'_>, controller: Controller, options: GuiOptions) -> Self {
        info!("Initializing egui window");

        #[cfg(windows)]
        let (tray, tray_events) = match super::tray::Tray::create(&cc.egui_ctx) {
            Ok((tray, events)) => (Some(tray), Some(events)),
            Err(err) => {
                error!(error = ?err, "Failed to create tray icon");
                (None, None)
            }
        };
        #[cfg(not(windows))]
        let tray_events: Option<Receiver<TrayCommand>> = {
            info!("No tray icon on this platform; closing the window exits");
            None
        };

        let mut shell = ShellState::new(tray_events.is_some());
        if options.start_minimized && shell.start_hidden() {
            info!("Starting hidden in tray");
            for command in (ShellAction::HideToTray { notify: false }).viewport_commands() {
                cc.egui_ctx.send_viewport_cmd(command);
            }
        }

        Self {
            controller,
            shell,
            toasts: ToastQueue::new(options.toast),
            last_toast: None,
            tray_events,
            #[cfg(windows)]
            tray,
            status_message: None,
        }
    }

    fn report(&mut self, result: Result<(), ControllerError>, success: Option<String>) {
        match result {
            Ok(()) => {
                if let Some(text) = success {
                    self.status_message = Some(StatusMessage { text, color: STATUS_OK });
                }
            }
            Err(err) => {
                error!(error = %err, "Action failed");
                self.status_message = Some(StatusMessage {
                    text: err.to_string(),
                    color: STATUS_ERROR,
                });
            }
        }
    }

    fn handle_profile_action(&mut self, action: profile_panel::ProfileAction) {
        match action {
            profile_panel::ProfileAction::None => {}
            profile_panel::ProfileAction::Apply(profile, shown) => {
                let result = self.controller.apply_speed(profile, shown);
                let text = format!("{profile} applied (speed {})", self.controller.speed(profile));
                self.report(result, Some(text));
            }
            profile_panel::ProfileAction::Adjust(profile, value) => {
                let result = self.controller.adjust(profile, value);
                self.report(result, None);
            }
        }
    }

    fn run_shell_action(&mut self, ctx: &egui::Context, action: ShellAction) {
        match action {
            ShellAction::HideToTray { notify: true } => {
                self.last_toast = Some(self.toasts.push(
                    toast_text::MINIMIZED_TITLE,
                    toast_text::MINIMIZED_MESSAGE,
                    Instant::now(),
                ));
            }
            ShellAction::Restore => {
                // The "still running" toast is moot once the window is back
                if let Some(id) = self.last_toast.take() {
                    self.toasts.cancel(id);
                }
            }
            _ => {}
        }
        for command in action.viewport_commands() {
            ctx.send_viewport_cmd(command);
        }
    }

    fn process_tray_events(&mut self, ctx: &egui::Context) {
        let commands: Vec<TrayCommand> = match &self.tray_events {
            Some(rx) => rx.try_iter().collect(),
            None => return,
        };
        for command in commands {
            let action = self.shell.tray_command(command);
            self.run_shell_action(ctx, action);
        }
    }

    fn process_window_events(&mut self, ctx: &egui::Context) {
        let disabled = self.controller.notifications_disabled();

        if ctx.input(|i| i.viewport().close_requested()) {
            let action = self.shell.close_requested(disabled);
            self.run_shell_action(ctx, action);
        }

        let minimized = ctx.input(|i| i.viewport().minimized).unwrap_or(false);
        let action = self.shell.observe_minimized(minimized, disabled);
        self.run_shell_action(ctx, action);
    }

    fn show_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.heading("Mouse Profiles");
            match self.controller.current_speed() {
                Ok(speed) => ui.label(format!("Current pointer speed: {speed}")),
                Err(err) => ui.colored_label(STATUS_ERROR, err.to_string()),
            };
            ui.add_space(SECTION_SPACING);

            for profile in ProfileId::ALL {
                let action = profile_panel::ui(
                    ui,
                    profile,
                    self.controller.speed(profile),
                    self.controller.active() == Some(profile),
                    self.controller.can_apply(profile),
                );
                self.handle_profile_action(action);
                ui.add_space(ITEM_SPACING);
            }

            ui.add_space(SECTION_SPACING);

            let mut disabled = self.controller.notifications_disabled();
            if ui.checkbox(&mut disabled, "Disable notifications").changed() {
                let result = self.controller.set_notifications_disabled(disabled);
                self.report(result, None);
            }

            if let Some(message) = &self.status_message {
                ui.add_space(ITEM_SPACING);
                ui.colored_label(message.color, &message.text);
            }
        });
    }
}

impl eframe::App for MouseProfilesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_tray_events(ctx);
        self.process_window_events(ctx);
        self.show_main_panel(ctx);

        let now = Instant::now();
        self.toasts.prune(now);
        toast_view::show(ctx, &self.toasts, now);
        if let Some(wait) = self.toasts.next_repaint(now) {
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Toast viewports are transparent outside their rounded frame
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.controller.flush() {
            warn!(error = %err, "Failed to save pending settings during shutdown");
        }
        #[cfg(windows)]
        drop(self.tray.take());
        info!("Mouse Profiles exiting");
    }
}

pub fn run_gui(controller: Controller, options: GuiOptions) -> Result<()> {
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_resizable(false)
        .with_maximize_button(false)
        .with_title("Mouse Profiles");
    match load_app_icon() {
        Ok(icon) => viewport = viewport.with_icon(icon.into_icon_data()),
        Err(err) => warn!(error = ?err, "Failed to load window icon"),
    }

    let native_options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Mouse Profiles",
        native_options,
        Box::new(move |cc| Ok(Box::new(MouseProfilesApp::new(cc, controller, options)))),
    )
    .map_err(|err| anyhow!("Failed to launch Mouse Profiles window: {err}"))
}

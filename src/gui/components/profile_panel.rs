use eframe::egui;

use crate::constants::speed;
use crate::gui::constants::*;
use crate::profile::ProfileId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileAction {
    None,
    /// Apply at the speed the slider shows (1 for an unset profile)
    Apply(ProfileId, u32),
    Adjust(ProfileId, u32),
}

/// Slider position for a stored speed; an unset profile sits at the minimum
fn shown_speed(stored_speed: u32) -> u32 {
    stored_speed.clamp(speed::MIN, speed::MAX)
}

/// One profile row: name, speed slider and Apply button
pub fn ui(
    ui: &mut egui::Ui,
    profile: ProfileId,
    stored_speed: u32,
    active: bool,
    can_apply: bool,
) -> ProfileAction {
    let mut action = ProfileAction::None;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(profile.to_string()).strong());
            if active {
                ui.colored_label(ACTIVE_BADGE, "\u{25CF} Active");
            }
            if stored_speed == 0 {
                ui.weak("(not set)");
            }
        });

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            let mut value = shown_speed(stored_speed);
            ui.spacing_mut().slider_width = SLIDER_WIDTH;
            let slider = egui::Slider::new(&mut value, speed::MIN..=speed::MAX).step_by(1.0);
            if ui.add(slider).changed() {
                action = ProfileAction::Adjust(profile, value);
            }

            if ui.add_enabled(can_apply, egui::Button::new("Apply")).clicked() {
                action = ProfileAction::Apply(profile, value);
            }
        });
    });

    action
}

use std::time::Instant;

use eframe::egui;

use crate::gui::constants::*;
use crate::toast::{self, ToastQueue};

/// Usable screen area in points
fn work_area(ctx: &egui::Context) -> egui::Rect {
    #[cfg(windows)]
    {
        let ppp = ctx
            .input(|i| i.viewport().native_pixels_per_point)
            .unwrap_or(1.0);
        match crate::win32_utils::work_area() {
            Ok((left, top, right, bottom)) => {
                return egui::Rect::from_min_max(
                    egui::pos2(left as f32 / ppp, top as f32 / ppp),
                    egui::pos2(right as f32 / ppp, bottom as f32 / ppp),
                );
            }
            Err(e) => tracing::warn!(error = %e, "Failed to query work area, using monitor size"),
        }
    }

    let monitor = ctx
        .input(|i| i.viewport().monitor_size)
        .unwrap_or(egui::vec2(1280.0, 720.0));
    egui::Rect::from_min_size(egui::Pos2::ZERO, monitor)
}

/// Render every live toast as its own borderless, click-through window
pub fn show(ctx: &egui::Context, queue: &ToastQueue, now: Instant) {
    if queue.is_empty() {
        return;
    }

    let options = *queue.options();
    let position = toast::anchor(work_area(ctx), options.size, options.margin);

    for (item, phase) in queue.visible(now) {
        let opacity = phase.opacity();
        let builder = egui::ViewportBuilder::default()
            .with_title(item.title.clone())
            .with_inner_size(options.size)
            .with_position(position)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_mouse_passthrough(true);

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of(("toast", item.id.raw())),
            builder,
            |ctx, _class| {
                let frame = egui::Frame::NONE
                    .fill(TOAST_BACKGROUND.gamma_multiply(opacity))
                    .corner_radius(egui::CornerRadius::same(TOAST_CORNER_RADIUS))
                    .inner_margin(egui::Margin::same(TOAST_INNER_MARGIN));
                egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                    let text = TOAST_TEXT.gamma_multiply(opacity);
                    ui.label(egui::RichText::new(&item.title).strong().color(text));
                    ui.label(egui::RichText::new(&item.message).color(text));
                });
            },
        );
    }
}

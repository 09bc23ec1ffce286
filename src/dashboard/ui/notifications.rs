use eframe::egui::{self, Align2, Area, Color32, Frame, Id, Order, RichText, Stroke};

use super::DashboardApp;
use super::style;

impl DashboardApp {
    /// Show the front notification as a modal; OK dismisses it.
    pub(super) fn render_notification(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.ui.notifications.front().cloned() else {
            return;
        };
        modal_backdrop(ctx, Id::new("notification_backdrop"));
        let palette = style::palette();
        let accent = style::notice_accent(notice.tone);
        let mut dismissed = false;
        Area::new(Id::new("notification_panel"))
            .order(Order::Tooltip)
            .constrain(true)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                Frame::window(&ctx.style())
                    .fill(style::compartment_fill())
                    .stroke(Stroke::new(1.0, accent))
                    .show(ui, |ui| {
                        ui.set_min_width(280.0);
                        ui.heading(RichText::new(&notice.title).color(accent));
                        ui.add_space(6.0);
                        ui.label(RichText::new(&notice.text).color(palette.text_primary));
                        ui.add_space(10.0);
                        let ok = ui.button("OK");
                        let enter = ui.input(|input| input.key_pressed(egui::Key::Enter));
                        if ok.clicked() || enter {
                            dismissed = true;
                        }
                    });
            });
        if dismissed {
            self.controller.dismiss_notification();
        }
    }
}

/// Dim the viewport and swallow pointer input behind the modal.
fn modal_backdrop(ctx: &egui::Context, id: Id) {
    let rect = ctx.viewport_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(Order::Tooltip, id.with("paint")));
    painter.rect_filled(rect, 0.0, Color32::from_rgba_premultiplied(0, 0, 0, 160));
    Area::new(id.with("blocker"))
        .order(Order::Tooltip)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
        });
}

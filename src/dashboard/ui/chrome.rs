use eframe::egui::{self, Frame, Margin, RichText, Stroke, StrokeKind};

use super::DashboardApp;
use super::style;

impl DashboardApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(Stroke::new(1.0, palette.panel_outline))
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Attendance Dashboard")
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new(&self.controller.settings().server_url)
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let exporting = self.controller.ui.export.in_progress;
                        let label = if exporting { "Exporting..." } else { "Export CSV" };
                        let response = ui
                            .add_enabled(!exporting, egui::Button::new(label))
                            .on_hover_text("Download the attendance log as CSV");
                        if response.clicked() {
                            self.controller.export_csv_via_dialog();
                        }
                        if let Some(path) = self.controller.ui.export.last_path.as_ref() {
                            ui.label(
                                RichText::new(format!("Last export: {}", path.display()))
                                    .color(palette.text_muted),
                            );
                        }
                    });
                });
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(Stroke::new(1.0, palette.panel_outline))
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        Stroke::new(1.0, palette.panel_outline),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    let text = ui.label(RichText::new(&status.text).color(palette.text_primary));
                    if status.log.len() > 1 {
                        text.on_hover_ui(|ui| {
                            for entry in status.log.iter().rev().take(10) {
                                ui.label(entry);
                            }
                        });
                    }
                });
            });
    }
}

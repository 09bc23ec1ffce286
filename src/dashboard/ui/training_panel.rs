use eframe::egui::{self, Frame, Margin, ProgressBar, RichText, Stroke, Ui};

use super::DashboardApp;
use super::style;

impl DashboardApp {
    pub(super) fn render_training_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        Frame::new()
            .fill(style::compartment_fill())
            .stroke(Stroke::new(1.0, palette.panel_outline))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Model training").color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let enabled = self.controller.ui.training.trigger_enabled;
                        if ui
                            .add_enabled(enabled, egui::Button::new("Train model"))
                            .clicked()
                        {
                            self.controller.request_training();
                        }
                    });
                });
                ui.add_space(8.0);
                let training = &self.controller.ui.training;
                let bar = ProgressBar::new(training.progress.fraction())
                    .desired_width(ui.available_width())
                    .text(training.progress.label());
                ui.add(bar);
                ui.add_space(4.0);
                ui.label(RichText::new(&training.message).color(palette.text_muted));
            });
    }
}

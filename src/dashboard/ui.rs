//! egui renderer for the attendance dashboard.

mod chart_view;
mod chrome;
mod notifications;
pub mod style;
mod training_panel;

use std::time::{Duration, Instant};

use eframe::egui::{self, Frame, Margin};

use crate::dashboard::controller::DashboardController;

/// Upper bound on the repaint delay while requests are outstanding.
const ACTIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the dashboard from the controller's UI model.
pub struct DashboardApp {
    controller: DashboardController,
    visuals_set: bool,
}

impl DashboardApp {
    pub fn new(controller: DashboardController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let mut delay = self.controller.next_wakeup(now);
        if self.controller.has_pending_jobs() {
            delay = delay.min(ACTIVE_REPAINT_INTERVAL);
        }
        ctx.request_repaint_after(delay);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);
        self.apply_visuals(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(style::palette().bg_primary)
                    .inner_margin(Margin::same(12)),
            )
            .show(ctx, |ui| {
                self.render_training_panel(ui);
                ui.add_space(12.0);
                self.render_chart_panel(ui);
            });
        self.render_notification(ctx);
        self.schedule_repaint(ctx, now);
    }
}

#![deny(missing_docs)]

//! Entry point for the attendance dashboard.
use std::sync::Arc;

use attendance_dashboard::backend::HttpBackend;
use attendance_dashboard::config::{self, DashboardSettings};
use attendance_dashboard::dashboard::{DashboardApp, DashboardController};
use attendance_dashboard::logging;
use eframe::egui;

const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(640.0, 480.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load_or_default();
    let log_settings = settings
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();
    if let Err(err) = logging::init(&log_settings) {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(960.0, 680.0))
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Attendance Dashboard",
        native_options,
        Box::new(move |_cc| match build_app(settings) {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

fn build_app(
    settings: Result<DashboardSettings, config::ConfigError>,
) -> Result<DashboardApp, String> {
    let settings = settings.map_err(|err| format!("Failed to load config: {err}"))?;
    let backend = HttpBackend::from_settings(&settings)
        .map_err(|err| format!("Invalid server address: {err}"))?;
    tracing::info!(server = %settings.server_url, "Dashboard starting");
    let controller = DashboardController::new(settings, Arc::new(backend));
    Ok(DashboardApp::new(controller))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start dashboard");
                ui.label(&self.message);
            });
        });
    }
}

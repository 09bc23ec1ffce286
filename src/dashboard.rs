//! Training progress and attendance chart dashboard.

/// Controller that owns UI state and drives both polling loops.
pub mod controller;
/// Plain data consumed by the renderer.
pub mod state;
/// egui rendering.
pub mod ui;

pub use controller::DashboardController;
pub use ui::DashboardApp;

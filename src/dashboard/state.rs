//! Shared state types for the egui dashboard.

mod chart;
mod notifications;
mod status;
mod training;

use std::path::PathBuf;

pub use chart::{ATTENDANCE_DATASET_LABEL, BarChart, ChartState, attendance_bar_color};
pub use notifications::{NoticeTone, Notification, NotificationState};
pub use status::StatusBarState;
pub use training::{ProgressDisplay, TrainingPanelState, TrainingPhase};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub training: TrainingPanelState,
    pub chart: ChartState,
    pub notifications: NotificationState,
    pub export: ExportState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            training: TrainingPanelState::default(),
            chart: ChartState::default(),
            notifications: NotificationState::default(),
            export: ExportState::default(),
        }
    }
}

/// CSV export affordances in the top bar.
#[derive(Clone, Debug, Default)]
pub struct ExportState {
    pub in_progress: bool,
    /// Destination of the last successful export.
    pub last_path: Option<PathBuf>,
}

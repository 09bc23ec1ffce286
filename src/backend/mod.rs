//! Server endpoints consumed by the dashboard.

mod http;
mod types;

use std::io::Write;

pub use http::{Endpoints, HttpBackend};
pub use types::{
    AttendanceStats, ExportError, PollError, StartError, StartOutcome, TrainingStatus,
};

/// Blocking access to the attendance server.
///
/// Calls run on background threads, one request per call.
pub trait DashboardBackend: Send + Sync {
    /// Ask the server to launch a training run (`/train_model`).
    fn start_training(&self) -> Result<StartOutcome, StartError>;
    /// Fetch the current training progress (`/train_status`).
    fn training_status(&self) -> Result<TrainingStatus, PollError>;
    /// Fetch per-day attendance counts (`/attendance_stats`).
    fn attendance_stats(&self) -> Result<AttendanceStats, PollError>;
    /// Stream the attendance CSV export (`/download_csv`) into `writer`.
    fn download_attendance_csv(&self, writer: &mut dyn Write) -> Result<u64, ExportError>;
}

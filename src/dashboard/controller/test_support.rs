use std::collections::VecDeque;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::DashboardController;
use crate::backend::{
    AttendanceStats, DashboardBackend, ExportError, PollError, StartError, StartOutcome,
    TrainingStatus,
};
use crate::config::DashboardSettings;

pub(super) const JOB_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend that replays queued responses in order; an empty queue reports a
/// transport failure.
#[derive(Default)]
pub(super) struct ScriptedBackend {
    starts: Mutex<VecDeque<Result<StartOutcome, StartError>>>,
    statuses: Mutex<VecDeque<Result<TrainingStatus, PollError>>>,
    stats: Mutex<VecDeque<Result<AttendanceStats, PollError>>>,
    csv: Mutex<Option<String>>,
    start_calls: AtomicUsize,
    status_calls: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub(super) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(super) fn push_start(&self, result: Result<StartOutcome, StartError>) {
        self.starts.lock().unwrap().push_back(result);
    }

    pub(super) fn push_status(&self, progress: u8, message: Option<&str>) {
        self.statuses
            .lock()
            .unwrap()
            .push_back(Ok(TrainingStatus::new(progress, message)));
    }

    pub(super) fn push_status_payload(&self, status: TrainingStatus) {
        self.statuses.lock().unwrap().push_back(Ok(status));
    }

    pub(super) fn push_status_error(&self) {
        self.statuses
            .lock()
            .unwrap()
            .push_back(Err(PollError::Status {
                code: 500,
                body: "boom".into(),
            }));
    }

    pub(super) fn push_stats(&self, points: &[(&str, u64)]) {
        self.stats
            .lock()
            .unwrap()
            .push_back(Ok(AttendanceStats::new(points.iter().copied())));
    }

    pub(super) fn push_stats_error(&self) {
        self.stats
            .lock()
            .unwrap()
            .push_back(Err(PollError::Transport("connection refused".into())));
    }

    pub(super) fn set_csv(&self, body: &str) {
        *self.csv.lock().unwrap() = Some(body.to_string());
    }

    pub(super) fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub(super) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub(super) fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

impl DashboardBackend for ScriptedBackend {
    fn start_training(&self) -> Result<StartOutcome, StartError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StartError::Transport("no scripted start".into())))
    }

    fn training_status(&self) -> Result<TrainingStatus, PollError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PollError::Transport("no scripted status".into())))
    }

    fn attendance_stats(&self) -> Result<AttendanceStats, PollError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PollError::Transport("no scripted stats".into())))
    }

    fn download_attendance_csv(&self, writer: &mut dyn Write) -> Result<u64, ExportError> {
        let body = self.csv.lock().unwrap().clone();
        let Some(body) = body else {
            return Err(ExportError::Status {
                code: 404,
                body: "No attendance data".into(),
            });
        };
        writer.write_all(body.as_bytes())?;
        Ok(body.len() as u64)
    }
}

pub(super) fn controller_with(backend: &Arc<ScriptedBackend>) -> DashboardController {
    let backend: Arc<dyn DashboardBackend> = backend.clone();
    DashboardController::new(DashboardSettings::default(), backend)
}

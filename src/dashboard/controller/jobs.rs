use crate::backend::{
    AttendanceStats, DashboardBackend, ExportError, PollError, StartError, StartOutcome,
    TrainingStatus,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Arc,
        mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError},
    },
    thread,
    time::Duration,
};

/// Error text reported when a request worker dies before replying.
const WORKER_PANICKED: &str = "request worker panicked";

pub(crate) enum JobMessage {
    TrainingStarted(TrainingStartResult),
    TrainingStatusPolled(TrainingStatusResult),
    StatsFetched(StatsFetchResult),
    CsvExported(CsvExportResult),
}

#[derive(Debug)]
pub(crate) struct TrainingStartResult {
    pub(crate) run_id: u64,
    pub(crate) result: Result<StartOutcome, StartError>,
}

#[derive(Debug)]
pub(crate) struct TrainingStatusResult {
    pub(crate) run_id: u64,
    pub(crate) sequence: u64,
    pub(crate) result: Result<TrainingStatus, PollError>,
}

#[derive(Debug)]
pub(crate) struct StatsFetchResult {
    pub(crate) sequence: u64,
    pub(crate) result: Result<AttendanceStats, PollError>,
}

#[derive(Debug)]
pub(crate) struct CsvExportResult {
    pub(crate) path: PathBuf,
    pub(crate) result: Result<u64, ExportError>,
}

/// Spawns one thread per request and funnels every result into a single channel
/// drained by the UI thread.
pub(crate) struct DashboardJobs {
    backend: Arc<dyn DashboardBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: usize,
    export_in_progress: bool,
}

impl DashboardJobs {
    pub(crate) fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            in_flight: 0,
            export_in_progress: false,
        }
    }

    /// Number of requests that have not reported back yet.
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn try_recv_message(&mut self) -> Result<JobMessage, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }

    pub(crate) fn recv_message_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<JobMessage, RecvTimeoutError> {
        let message = self.message_rx.recv_timeout(timeout)?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }

    pub(crate) fn begin_training_start(&mut self, run_id: u64) {
        let fallback = JobMessage::TrainingStarted(TrainingStartResult {
            run_id,
            result: Err(StartError::Transport(WORKER_PANICKED.to_string())),
        });
        self.spawn(fallback, move |backend| {
            JobMessage::TrainingStarted(TrainingStartResult {
                run_id,
                result: backend.start_training(),
            })
        });
    }

    pub(crate) fn begin_status_poll(&mut self, run_id: u64, sequence: u64) {
        let fallback = JobMessage::TrainingStatusPolled(TrainingStatusResult {
            run_id,
            sequence,
            result: Err(PollError::Transport(WORKER_PANICKED.to_string())),
        });
        self.spawn(fallback, move |backend| {
            JobMessage::TrainingStatusPolled(TrainingStatusResult {
                run_id,
                sequence,
                result: backend.training_status(),
            })
        });
    }

    pub(crate) fn begin_stats_fetch(&mut self, sequence: u64) {
        let fallback = JobMessage::StatsFetched(StatsFetchResult {
            sequence,
            result: Err(PollError::Transport(WORKER_PANICKED.to_string())),
        });
        self.spawn(fallback, move |backend| {
            JobMessage::StatsFetched(StatsFetchResult {
                sequence,
                result: backend.attendance_stats(),
            })
        });
    }

    pub(crate) fn export_in_progress(&self) -> bool {
        self.export_in_progress
    }

    pub(crate) fn begin_csv_export(&mut self, path: PathBuf) {
        if self.export_in_progress {
            return;
        }
        self.export_in_progress = true;
        let fallback = JobMessage::CsvExported(CsvExportResult {
            path: path.clone(),
            result: Err(ExportError::Transport(WORKER_PANICKED.to_string())),
        });
        self.spawn(fallback, move |backend| {
            let result = write_export(backend.as_ref(), &path);
            JobMessage::CsvExported(CsvExportResult { path, result })
        });
    }

    pub(crate) fn clear_csv_export(&mut self) {
        self.export_in_progress = false;
    }

    /// Run `job` on its own thread. If it unwinds, `fallback` is sent in its
    /// place so `in_flight` always drains.
    fn spawn<F>(&mut self, fallback: JobMessage, job: F)
    where
        F: FnOnce(Arc<dyn DashboardBackend>) -> JobMessage + Send + 'static,
    {
        self.in_flight += 1;
        let backend = Arc::clone(&self.backend);
        let reply = ReplyGuard {
            tx: self.message_tx.clone(),
            fallback: Some(fallback),
        };
        thread::spawn(move || {
            let message = job(backend);
            reply.send(message);
        });
    }
}

/// Sends exactly one message per job, including when the job panics.
struct ReplyGuard {
    tx: Sender<JobMessage>,
    fallback: Option<JobMessage>,
}

impl ReplyGuard {
    fn send(mut self, message: JobMessage) {
        self.fallback = None;
        let _ = self.tx.send(message);
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            let _ = self.tx.send(fallback);
        }
    }
}

/// Download into a sibling temp file and rename it into place once complete.
fn write_export(backend: &dyn DashboardBackend, path: &Path) -> Result<u64, ExportError> {
    let partial = path.with_extension("csv.part");
    let result = std::fs::File::create(&partial)
        .map_err(ExportError::from)
        .and_then(|file| {
            let mut writer = std::io::BufWriter::new(file);
            let written = backend.download_attendance_csv(&mut writer)?;
            writer.flush()?;
            Ok(written)
        })
        .and_then(|written| {
            std::fs::rename(&partial, path)?;
            Ok(written)
        });
    if result.is_err() {
        let _ = std::fs::remove_file(&partial);
    }
    result
}

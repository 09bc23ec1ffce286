use serde::Deserialize;

/// How the server acknowledged a training start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new training run was launched.
    Started,
    /// A run was already in progress; polling attaches to it.
    AlreadyRunning,
    /// Accepted without a recognizable body.
    Accepted,
}

impl StartOutcome {
    /// Classify the `/train_model` body; unknown bodies still count as accepted.
    pub fn from_body(body: &str) -> Self {
        #[derive(Deserialize)]
        struct StartWire {
            status: Option<String>,
        }
        let status = serde_json::from_str::<StartWire>(body.trim())
            .ok()
            .and_then(|wire| wire.status);
        match status.as_deref() {
            Some("started") => Self::Started,
            Some("already_running") => Self::AlreadyRunning,
            _ => Self::Accepted,
        }
    }
}

/// Snapshot of the server-side training job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingStatus {
    /// Percent complete, always within `0..=100`.
    pub progress: u8,
    pub message: Option<String>,
    /// Whether the server reports a worker as still running, when it says so.
    pub running: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct TrainingStatusWire {
    progress: Option<f64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    running: Option<bool>,
}

impl TrainingStatus {
    pub fn new(progress: u8, message: Option<&str>) -> Self {
        Self {
            progress: progress.min(100),
            message: message.map(str::to_string),
            running: None,
        }
    }

    /// Parse a `/train_status` body.
    pub fn parse(body: &str) -> Result<Self, PollError> {
        let trimmed = body.trim();
        let wire: TrainingStatusWire = serde_json::from_str(trimmed)
            .map_err(|err| PollError::Json(format!("{err}: {trimmed}")))?;
        let Some(progress) = wire.progress else {
            return Err(PollError::Invalid("missing progress".to_string()));
        };
        if !progress.is_finite() {
            return Err(PollError::Invalid(format!("progress is {progress}")));
        }
        Ok(Self {
            progress: progress.round().clamp(0.0, 100.0) as u8,
            message: wire.message,
            running: wire.running,
        })
    }

    /// True when the job reached 100% or its message carries the completion marker.
    pub fn is_complete(&self, marker: &str) -> bool {
        self.progress >= 100
            || self
                .message
                .as_deref()
                .is_some_and(|message| message.contains(marker))
    }
}

/// Attendance counts per day, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceStats {
    pub dates: Vec<String>,
    pub counts: Vec<u64>,
}

impl AttendanceStats {
    /// Build stats from paired labels and counts.
    pub fn new<S: Into<String>>(points: impl IntoIterator<Item = (S, u64)>) -> Self {
        let (dates, counts): (Vec<String>, Vec<u64>) = points
            .into_iter()
            .map(|(date, count)| (date.into(), count))
            .unzip();
        Self { dates, counts }
    }

    /// Parse an `/attendance_stats` body, rejecting mismatched series.
    pub fn parse(body: &str) -> Result<Self, PollError> {
        let trimmed = body.trim();
        let stats: Self = serde_json::from_str(trimmed)
            .map_err(|err| PollError::Json(format!("{err}: {trimmed}")))?;
        if stats.dates.len() != stats.counts.len() {
            return Err(PollError::Invalid(format!(
                "{} dates but {} counts",
                stats.dates.len(),
                stats.counts.len()
            )));
        }
        Ok(stats)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("Server rejected training start (HTTP {code}): {body}")]
    Rejected { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
}

/// Failure of a single status or stats poll. Every variant is treated the same
/// way by the polling loops.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Invalid payload: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

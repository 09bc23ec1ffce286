use std::time::Instant;

/// Lifecycle of the training loop.
///
/// `Idle` -> `Starting` (start request in flight) -> `Polling` (status deadline
/// armed) -> back to `Idle` on completion or a failed start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrainingPhase {
    #[default]
    Idle,
    Starting {
        run_id: u64,
    },
    Polling {
        run_id: u64,
        next_poll_at: Instant,
    },
}

impl TrainingPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, Self::Polling { .. })
    }

    /// Run id of the active run, if any.
    pub fn run_id(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Starting { run_id } | Self::Polling { run_id, .. } => Some(*run_id),
        }
    }

    /// Deadline of the next status poll while polling.
    pub fn next_poll_at(&self) -> Option<Instant> {
        match self {
            Self::Polling { next_poll_at, .. } => Some(*next_poll_at),
            _ => None,
        }
    }
}

/// Percent value driving the progress bar fill and its label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressDisplay {
    percent: u8,
}

impl ProgressDisplay {
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Fill fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Widgets of the training panel: trigger button, progress bar, message line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingPanelState {
    pub trigger_enabled: bool,
    pub progress: ProgressDisplay,
    pub message: String,
}

impl Default for TrainingPanelState {
    fn default() -> Self {
        Self {
            trigger_enabled: true,
            progress: ProgressDisplay::default(),
            message: String::new(),
        }
    }
}

use super::jobs::{TrainingStartResult, TrainingStatusResult};
use super::*;
use crate::backend::StartOutcome;
use crate::dashboard::state::ProgressDisplay;

/// Bookkeeping for the start-then-poll training loop.
#[derive(Debug)]
pub(super) struct TrainingLoop {
    pub(super) phase: TrainingPhase,
    next_run_id: u64,
    next_sequence: u64,
    /// Sequence of the newest status response that was applied.
    last_applied_sequence: u64,
}

impl Default for TrainingLoop {
    fn default() -> Self {
        Self {
            phase: TrainingPhase::Idle,
            next_run_id: 1,
            next_sequence: 1,
            last_applied_sequence: 0,
        }
    }
}

impl TrainingLoop {
    fn allocate_run_id(&mut self) -> u64 {
        let run_id = self.next_run_id;
        self.next_run_id += 1;
        run_id
    }

    fn allocate_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

impl DashboardController {
    pub fn training_phase(&self) -> TrainingPhase {
        self.training.phase
    }

    /// Handle a click on the train button.
    ///
    /// Ignored unless the loop is idle, so a run can never be started twice.
    pub fn request_training(&mut self) {
        if !self.training.phase.is_idle() {
            tracing::debug!(phase = ?self.training.phase, "Ignoring training request while active");
            return;
        }
        let run_id = self.training.allocate_run_id();
        self.ui.training.trigger_enabled = false;
        self.training.phase = TrainingPhase::Starting { run_id };
        self.set_status("Starting training", StatusTone::Busy);
        tracing::info!(run_id, "Requesting training start");
        self.jobs.begin_training_start(run_id);
    }

    /// Cancel the status poll deadline and return to idle.
    pub fn stop_polling(&mut self) {
        if let Some(run_id) = self.training.phase.run_id() {
            tracing::info!(run_id, "Stopping training status polling");
        }
        self.training.phase = TrainingPhase::Idle;
        self.ui.training.trigger_enabled = true;
    }

    pub(super) fn schedule_status_poll(&mut self, now: Instant) {
        let TrainingPhase::Polling {
            run_id,
            next_poll_at,
        } = self.training.phase
        else {
            return;
        };
        if now < next_poll_at {
            return;
        }
        let sequence = self.training.allocate_sequence();
        self.jobs.begin_status_poll(run_id, sequence);
        let interval = self.settings.training.poll_interval();
        let mut next = next_poll_at + interval;
        if next <= now {
            // Missed ticks collapse into a single poll.
            next = now + interval;
        }
        self.training.phase = TrainingPhase::Polling {
            run_id,
            next_poll_at: next,
        };
    }

    pub(super) fn apply_training_start(&mut self, message: TrainingStartResult, now: Instant) {
        let TrainingStartResult { run_id, result } = message;
        if self.training.phase != (TrainingPhase::Starting { run_id }) {
            tracing::debug!(run_id, "Discarding start response for an abandoned run");
            return;
        }
        match result {
            Ok(outcome) => {
                if outcome == StartOutcome::AlreadyRunning {
                    tracing::info!(run_id, "Training already running on the server");
                } else {
                    tracing::info!(run_id, ?outcome, "Training started");
                }
                self.ui.training.message = "Training started...".to_string();
                self.ui.training.progress =
                    ProgressDisplay::new(self.settings.training.start_placeholder_percent);
                self.training.phase = TrainingPhase::Polling {
                    run_id,
                    next_poll_at: now + self.settings.training.poll_interval(),
                };
                let status = match outcome {
                    StartOutcome::AlreadyRunning => "Training already running; following progress",
                    StartOutcome::Started | StartOutcome::Accepted => "Training started",
                };
                self.set_status(status, StatusTone::Busy);
            }
            Err(err) => {
                tracing::warn!(run_id, "Failed to start training: {err}");
                self.training.phase = TrainingPhase::Idle;
                self.ui.training.trigger_enabled = true;
                self.ui
                    .notifications
                    .push(Notification::error("Training", "Failed to start training"));
                self.set_status(format!("Failed to start training: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_training_status(&mut self, message: TrainingStatusResult, now: Instant) {
        let TrainingStatusResult {
            run_id,
            sequence,
            result,
        } = message;
        let active = matches!(
            self.training.phase,
            TrainingPhase::Polling { run_id: active, .. } if active == run_id
        );
        if !active {
            tracing::debug!(run_id, sequence, "Discarding status for an inactive run");
            return;
        }
        if sequence <= self.training.last_applied_sequence {
            tracing::debug!(
                sequence,
                newest = self.training.last_applied_sequence,
                "Discarding out-of-order status"
            );
            return;
        }
        let status = match result {
            Ok(status) => status,
            Err(err) => {
                tracing::error!("Training status poll failed: {err}");
                return;
            }
        };
        self.training.last_applied_sequence = sequence;
        tracing::debug!(
            progress = status.progress,
            message = ?status.message,
            running = ?status.running,
            "Training status"
        );
        self.ui.training.progress = ProgressDisplay::new(status.progress);
        self.ui.training.message = status.message.clone().unwrap_or_default();
        if status.is_complete(&self.settings.training.completion_marker) {
            self.finish_training(run_id, now);
        } else if status.running == Some(false) {
            // Keep polling; only progress or the marker ends a run.
            tracing::warn!(
                run_id,
                progress = status.progress,
                "Server reports no training worker running"
            );
            self.set_status(
                format!(
                    "Training stopped at {}%: {}",
                    status.progress, self.ui.training.message
                ),
                StatusTone::Warning,
            );
        } else {
            self.set_status(format!("Training {}%", status.progress), StatusTone::Busy);
        }
    }

    fn finish_training(&mut self, run_id: u64, now: Instant) {
        tracing::info!(run_id, "Training complete");
        self.stop_polling();
        self.ui.training.progress = ProgressDisplay::new(100);
        self.set_status("Training complete", StatusTone::Info);
        let due_at = now + self.settings.training.completion_notice_delay();
        self.schedule_notice(
            due_at,
            Notification::success("Training", "Training Completed Successfully!"),
        );
    }
}

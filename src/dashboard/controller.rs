//! Dashboard controller: owns the UI model and drives the training and chart loops.
//!
//! All state lives on the UI thread. Requests run on short-lived worker threads
//! (see [`jobs`]) and report back over a channel that [`DashboardController::tick`]
//! drains once per frame. Time is passed in by the caller so every deadline can
//! be driven deterministically.

mod background_jobs;
mod export;
pub(crate) mod jobs;
mod stats;
mod training;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::DashboardBackend;
use crate::config::DashboardSettings;
use crate::dashboard::state::{Notification, UiState};
use crate::dashboard::ui::style::StatusTone;

use jobs::DashboardJobs;
use stats::StatsLoop;
use training::TrainingLoop;

pub use crate::dashboard::state::TrainingPhase;

/// Maintains dashboard state and bridges the backend to the egui renderer.
pub struct DashboardController {
    pub ui: UiState,
    settings: DashboardSettings,
    jobs: DashboardJobs,
    training: TrainingLoop,
    stats: StatsLoop,
    scheduled_notices: Vec<ScheduledNotice>,
}

/// A notification held back until its due time.
#[derive(Clone, Debug)]
struct ScheduledNotice {
    due_at: Instant,
    notification: Notification,
}

impl DashboardController {
    pub fn new(settings: DashboardSettings, backend: Arc<dyn DashboardBackend>) -> Self {
        Self {
            ui: UiState::default(),
            settings,
            jobs: DashboardJobs::new(backend),
            training: TrainingLoop::default(),
            stats: StatsLoop::default(),
            scheduled_notices: Vec::new(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Advance both loops to `now`: apply finished requests, fire due
    /// notifications, and issue any polls whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        self.poll_background_jobs(now);
        self.fire_due_notices(now);
        self.schedule_status_poll(now);
        self.schedule_stats_refresh(now);
    }

    /// Time until the earliest pending deadline.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let stats_due = self.stats.next_refresh_at().unwrap_or(now);
        let notice_due = self.scheduled_notices.iter().map(|notice| notice.due_at).min();
        [Some(stats_due), self.training.phase.next_poll_at(), notice_due]
            .into_iter()
            .flatten()
            .map(|due| due.saturating_duration_since(now))
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// True while any request has not reported back yet.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.in_flight() > 0
    }

    /// Block until every in-flight request has reported back and been applied.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_for_jobs(&mut self, now: Instant, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.jobs.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.jobs.recv_message_timeout(remaining) {
                Ok(message) => self.handle_job_message(message, now),
                Err(_) => return false,
            }
        }
        true
    }

    /// Acknowledge the notification currently on screen.
    pub fn dismiss_notification(&mut self) {
        self.ui.notifications.dismiss();
    }

    /// Number of notifications waiting for their due time.
    pub fn scheduled_notice_count(&self) -> usize {
        self.scheduled_notices.len()
    }

    fn schedule_notice(&mut self, due_at: Instant, notification: Notification) {
        self.scheduled_notices.push(ScheduledNotice {
            due_at,
            notification,
        });
    }

    fn fire_due_notices(&mut self, now: Instant) {
        if self.scheduled_notices.is_empty() {
            return;
        }
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled_notices)
            .into_iter()
            .partition(|notice| notice.due_at <= now);
        self.scheduled_notices = pending;
        for notice in due {
            self.ui.notifications.push(notice.notification);
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text.into(), tone);
    }
}

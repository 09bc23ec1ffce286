use super::jobs::StatsFetchResult;
use super::*;
use crate::dashboard::state::{ATTENDANCE_DATASET_LABEL, BarChart, attendance_bar_color};

/// Refresh deadline and response ordering for the attendance chart.
#[derive(Debug)]
pub(super) struct StatsLoop {
    /// `None` until the first fetch, which is due immediately.
    next_refresh_at: Option<Instant>,
    next_sequence: u64,
    last_applied_sequence: u64,
}

impl Default for StatsLoop {
    fn default() -> Self {
        Self {
            next_refresh_at: None,
            next_sequence: 1,
            last_applied_sequence: 0,
        }
    }
}

impl StatsLoop {
    pub(super) fn next_refresh_at(&self) -> Option<Instant> {
        self.next_refresh_at
    }
}

impl DashboardController {
    pub fn chart(&self) -> Option<&BarChart> {
        self.ui.chart.handle.as_ref()
    }

    pub(super) fn schedule_stats_refresh(&mut self, now: Instant) {
        if self.stats.next_refresh_at.is_some_and(|due| now < due) {
            return;
        }
        let sequence = self.stats.next_sequence;
        self.stats.next_sequence += 1;
        self.jobs.begin_stats_fetch(sequence);
        self.stats.next_refresh_at = Some(now + self.settings.chart.refresh_interval());
    }

    pub(super) fn apply_stats(&mut self, message: StatsFetchResult) {
        let StatsFetchResult { sequence, result } = message;
        if sequence <= self.stats.last_applied_sequence {
            tracing::debug!(
                sequence,
                newest = self.stats.last_applied_sequence,
                "Discarding out-of-order attendance stats"
            );
            return;
        }
        let stats = match result {
            Ok(stats) => stats,
            Err(err) => {
                tracing::error!("Attendance stats refresh failed: {err}");
                self.ui.chart.last_error = Some(err.to_string());
                return;
            }
        };
        self.stats.last_applied_sequence = sequence;
        self.ui.chart.last_error = None;
        tracing::debug!(days = stats.len(), "Attendance stats refreshed");
        match self.ui.chart.handle.as_mut() {
            Some(chart) => chart.set_data(stats),
            None => {
                self.ui.chart.instances_created += 1;
                self.ui.chart.handle = Some(BarChart::new(
                    self.ui.chart.instances_created,
                    ATTENDANCE_DATASET_LABEL,
                    attendance_bar_color(),
                    stats,
                ));
            }
        }
    }
}

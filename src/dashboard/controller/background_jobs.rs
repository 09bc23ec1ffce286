use super::jobs::JobMessage;
use super::*;
use std::sync::mpsc::TryRecvError;

impl DashboardController {
    pub(super) fn poll_background_jobs(&mut self, now: Instant) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            self.handle_job_message(message, now);
        }
    }

    pub(super) fn handle_job_message(&mut self, message: JobMessage, now: Instant) {
        match message {
            JobMessage::TrainingStarted(message) => self.apply_training_start(message, now),
            JobMessage::TrainingStatusPolled(message) => self.apply_training_status(message, now),
            JobMessage::StatsFetched(message) => self.apply_stats(message),
            JobMessage::CsvExported(message) => self.apply_csv_export(message),
        }
    }
}

use super::jobs::CsvExportResult;
use super::*;
use std::path::PathBuf;

/// File name offered in the save dialog.
pub(crate) const DEFAULT_EXPORT_FILE_NAME: &str = "attendance.csv";

impl DashboardController {
    /// Ask for a destination and download the attendance CSV there.
    pub fn export_csv_via_dialog(&mut self) {
        if self.jobs.export_in_progress() {
            self.set_status("Export already running", StatusTone::Info);
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(DEFAULT_EXPORT_FILE_NAME)
            .save_file()
        else {
            return;
        };
        self.export_csv_to(path);
    }

    /// Download the attendance CSV into `path` on a background thread.
    pub fn export_csv_to(&mut self, path: PathBuf) {
        if self.jobs.export_in_progress() {
            self.set_status("Export already running", StatusTone::Info);
            return;
        }
        self.ui.export.in_progress = true;
        self.set_status(
            format!("Exporting attendance to {}", path.display()),
            StatusTone::Busy,
        );
        self.jobs.begin_csv_export(path);
    }

    pub(super) fn apply_csv_export(&mut self, message: CsvExportResult) {
        let CsvExportResult { path, result } = message;
        self.jobs.clear_csv_export();
        self.ui.export.in_progress = false;
        match result {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), bytes, "Attendance CSV exported");
                self.set_status(
                    format!("Saved attendance to {}", path.display()),
                    StatusTone::Info,
                );
                self.ui.export.last_path = Some(path);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "Attendance CSV export failed: {err}");
                self.set_status(format!("Export failed: {err}"), StatusTone::Error);
            }
        }
    }
}

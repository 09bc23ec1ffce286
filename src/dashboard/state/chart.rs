use egui::Color32;

use crate::backend::AttendanceStats;

/// Dataset label shown in the chart legend.
pub const ATTENDANCE_DATASET_LABEL: &str = "Attendance";

/// Fill colour for attendance bars (blue at 70% opacity).
pub fn attendance_bar_color() -> Color32 {
    Color32::from_rgba_unmultiplied(59, 130, 246, 178)
}

/// A bar chart instance, created once and updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    instance_id: u64,
    dataset_label: String,
    color: Color32,
    labels: Vec<String>,
    values: Vec<u64>,
    revision: u64,
}

impl BarChart {
    pub(crate) fn new(
        instance_id: u64,
        dataset_label: impl Into<String>,
        color: Color32,
        stats: AttendanceStats,
    ) -> Self {
        Self {
            instance_id,
            dataset_label: dataset_label.into(),
            color,
            labels: stats.dates,
            values: stats.counts,
            revision: 0,
        }
    }

    /// Replace labels and values, bumping the revision so the view redraws.
    pub(crate) fn set_data(&mut self, stats: AttendanceStats) {
        self.labels = stats.dates;
        self.values = stats.counts;
        self.revision += 1;
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn dataset_label(&self) -> &str {
        &self.dataset_label
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of in-place updates since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Chart panel model: the lazily created chart plus refresh bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct ChartState {
    pub handle: Option<BarChart>,
    pub instances_created: u64,
    /// Most recent refresh failure, cleared on the next success.
    pub last_error: Option<String>,
}

use eframe::egui::{
    self, Align2, Color32, FontId, Frame, Margin, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2,
};

use super::DashboardApp;
use super::style;
use crate::dashboard::state::BarChart;

const CHART_HEIGHT: f32 = 280.0;
const AXIS_GUTTER: f32 = 40.0;
const LABEL_GUTTER: f32 = 22.0;
/// Share of each slot filled by its bar.
const BAR_FILL: f32 = 0.8;
const MIN_LABEL_SPACING: f32 = 56.0;
const GRID_LINES: u64 = 4;

impl DashboardApp {
    pub(super) fn render_chart_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        Frame::new()
            .fill(style::compartment_fill())
            .stroke(Stroke::new(1.0, palette.panel_outline))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Daily attendance").color(palette.text_primary));
                    if let Some(error) = self.controller.ui.chart.last_error.as_deref() {
                        ui.label(RichText::new("Refresh failed").color(palette.warning))
                            .on_hover_text(error);
                    }
                });
                ui.add_space(6.0);
                match self.controller.chart() {
                    Some(chart) => paint_bar_chart(ui, chart),
                    None => {
                        ui.add_sized(
                            [ui.available_width(), CHART_HEIGHT],
                            egui::Label::new(
                                RichText::new("Waiting for attendance data...")
                                    .color(palette.text_muted),
                            ),
                        );
                    }
                }
            });
    }
}

fn paint_bar_chart(ui: &mut Ui, chart: &BarChart) {
    let palette = style::palette();
    let desired = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let plot = plot_rect(response.rect);
    let axis_max = chart.max_value().max(1);
    let font = FontId::proportional(11.0);

    for step in 0..=GRID_LINES {
        let value = grid_value(axis_max, step);
        let y = value_to_y(plot, value, axis_max);
        let color = if step == 0 {
            palette.grid_strong
        } else {
            palette.grid_soft
        };
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, color),
        );
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            value.to_string(),
            font.clone(),
            palette.text_muted,
        );
    }

    let bars = bar_rects(plot, chart.values(), axis_max);
    let stride = label_stride(bars.len(), plot.width(), MIN_LABEL_SPACING);
    for (index, bar) in bars.iter().enumerate() {
        painter.rect_filled(*bar, 0.0, chart.color());
        if index % stride == 0
            && let Some(label) = chart.labels().get(index)
        {
            painter.text(
                Pos2::new(bar.center().x, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                label,
                font.clone(),
                palette.text_muted,
            );
        }
    }

    painter.text(
        Pos2::new(plot.right(), response.rect.top()),
        Align2::RIGHT_TOP,
        chart.dataset_label(),
        font,
        legend_color(chart.color()),
    );

    if let Some(pointer) = response.hover_pos()
        && let Some(index) = hovered_bar(plot, bars.len(), pointer)
        && let (Some(label), Some(value)) = (chart.labels().get(index), chart.values().get(index))
    {
        if let Some(bar) = bars.get(index) {
            painter.rect_stroke(
                *bar,
                0.0,
                Stroke::new(1.0, palette.accent_ice),
                egui::StrokeKind::Inside,
            );
        }
        response.on_hover_text_at_pointer(format!(
            "{label}\n{}: {value}",
            chart.dataset_label()
        ));
    }
}

fn legend_color(bar: Color32) -> Color32 {
    Color32::from_rgb(bar.r(), bar.g(), bar.b())
}

/// Area left for bars once the axis and date labels have their gutters.
fn plot_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + AXIS_GUTTER, rect.top() + LABEL_GUTTER),
        Pos2::new(rect.right(), rect.bottom() - LABEL_GUTTER),
    )
}

/// Value of gridline `step` out of `GRID_LINES`, exact for any `u64` maximum.
fn grid_value(axis_max: u64, step: u64) -> u64 {
    let scaled = u128::from(axis_max) * u128::from(step) / u128::from(GRID_LINES);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn value_to_y(plot: Rect, value: u64, axis_max: u64) -> f32 {
    let ratio = value as f32 / axis_max.max(1) as f32;
    plot.bottom() - plot.height() * ratio.clamp(0.0, 1.0)
}

/// One rect per value, evenly slotted across `plot` and rising from its bottom.
fn bar_rects(plot: Rect, values: &[u64], axis_max: u64) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = plot.width() / values.len() as f32;
    let width = slot * BAR_FILL;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let left = plot.left() + slot * index as f32 + (slot - width) / 2.0;
            let top = value_to_y(plot, *value, axis_max);
            Rect::from_min_max(Pos2::new(left, top), Pos2::new(left + width, plot.bottom()))
        })
        .collect()
}

/// Show every `n`th date label so neighbours do not overlap.
fn label_stride(count: usize, width: f32, min_spacing: f32) -> usize {
    if count == 0 || width <= 0.0 {
        return 1;
    }
    let fits = (width / min_spacing).floor().max(1.0) as usize;
    count.div_ceil(fits).max(1)
}

fn hovered_bar(plot: Rect, count: usize, pointer: Pos2) -> Option<usize> {
    if count == 0 || !plot.contains(pointer) {
        return None;
    }
    let slot = plot.width() / count as f32;
    let index = ((pointer.x - plot.left()) / slot).floor() as usize;
    (index < count).then_some(index)
}

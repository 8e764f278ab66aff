//! Chart Plotter Module
//! Interactive bar and line distribution charts using egui_plot.

use crate::data::ValueCounts;
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, PlotUi, Points};

/// Color palette for categories
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 260.0;

/// How per-column distributions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

/// Draws value-count charts with categories on the x axis.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a category.
    pub fn get_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Bar per category, height = count.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, counts: &ValueCounts) {
        Self::show_category_plot(ui, id, counts, |plot_ui| {
            let bars: Vec<Bar> = counts
                .entries
                .iter()
                .enumerate()
                .map(|(i, (label, n))| {
                    Bar::new(i as f64, *n as f64)
                        .width(0.6)
                        .name(label)
                        .fill(Self::get_color(i))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name(&counts.column));
        });
    }

    /// Counts joined in category order.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, counts: &ValueCounts) {
        Self::show_category_plot(ui, id, counts, |plot_ui| {
            let points: Vec<[f64; 2]> = counts
                .entries
                .iter()
                .enumerate()
                .map(|(i, (_, n))| [i as f64, *n as f64])
                .collect();

            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(PALETTE[0])
                    .width(2.0)
                    .name(&counts.column),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(3.5)
                    .color(PALETTE[0]),
            );
        });
    }

    /// Plot with one x tick per category, labelled with the category.
    fn show_category_plot(
        ui: &mut egui::Ui,
        id: &str,
        counts: &ValueCounts,
        build_fn: impl FnOnce(&mut PlotUi),
    ) {
        let labels = counts.labels();
        let n = labels.len();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_x(-0.5)
            .include_x(n as f64 - 0.5)
            .y_axis_label("count")
            .x_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, build_fn);
    }
}

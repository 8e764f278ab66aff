//! Chart Viewer Widget
//! Per-column distribution charts and the overall distribution chart.

use crate::charts::{ChartKind, ChartPlotter, StaticChartRenderer};
use crate::data::{OverallChart, ValueCounts};
use egui::{Color32, RichText, TextureHandle, TextureOptions};
use std::collections::HashMap;

const CHART_WIDTH: f32 = 620.0;

/// Draws the chart section. Pie charts are rasterised, so their textures are
/// kept until the counts behind them change.
#[derive(Default)]
pub struct ChartViewer {
    pie_textures: HashMap<String, (ValueCounts, TextureHandle)>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One chart per column, drawn with the selected chart kind.
    pub fn show_column_charts(&mut self, ui: &mut egui::Ui, charts: &[ValueCounts], kind: ChartKind) {
        if charts.is_empty() {
            ui.label(
                RichText::new("No column has more than one distinct value to chart.")
                    .color(Color32::GRAY),
            );
            return;
        }

        for counts in charts {
            ui.label(
                RichText::new(format!("{} Distribution", counts.column))
                    .size(16.0)
                    .strong(),
            );
            ui.label(RichText::new(format!("{} rows", counts.total())).weak());
            ui.add_space(4.0);
            ui.allocate_ui(egui::vec2(CHART_WIDTH, 0.0), |ui| match kind {
                ChartKind::Bar => {
                    ChartPlotter::draw_bar_chart(ui, &format!("bar_{}", counts.column), counts)
                }
                ChartKind::Line => {
                    ChartPlotter::draw_line_chart(ui, &format!("line_{}", counts.column), counts)
                }
                ChartKind::Pie => self.draw_pie(ui, counts),
            });
            ui.add_space(16.0);
        }
    }

    /// Overall chart over the full dataset, always a bar chart.
    pub fn show_overall(&mut self, ui: &mut egui::Ui, overall: &OverallChart) {
        match overall {
            OverallChart::Distribution(counts) => {
                ui.label(
                    RichText::new(format!("{} Distribution in Full Dataset", counts.column))
                        .size(16.0)
                        .strong(),
                );
                ui.add_space(4.0);
                ui.allocate_ui(egui::vec2(CHART_WIDTH, 0.0), |ui| {
                    ChartPlotter::draw_bar_chart(ui, &format!("overall_{}", counts.column), counts);
                });
            }
            OverallChart::Insufficient { column } => {
                ui.label(format!(
                    "No sufficient categorical data available for {}.",
                    column
                ));
            }
        }
    }

    fn draw_pie(&mut self, ui: &mut egui::Ui, counts: &ValueCounts) {
        let stale = self
            .pie_textures
            .get(&counts.column)
            .map_or(true, |(cached, _)| cached != counts);

        if stale {
            match StaticChartRenderer::render_pie_image(counts) {
                Ok(image) => {
                    let texture = ui.ctx().load_texture(
                        format!("pie_{}", counts.column),
                        image,
                        TextureOptions::LINEAR,
                    );
                    self.pie_textures
                        .insert(counts.column.clone(), (counts.clone(), texture));
                }
                Err(e) => {
                    tracing::warn!("Pie chart for {} failed: {}", counts.column, e);
                    self.pie_textures.remove(&counts.column);
                    ui.label(
                        RichText::new(format!("Error: {}", e)).color(Color32::from_rgb(220, 53, 69)),
                    );
                    return;
                }
            }
        }

        if let Some((_, texture)) = self.pie_textures.get(&counts.column) {
            ui.add(egui::Image::new(texture).max_width(CHART_WIDTH));
        }
    }
}

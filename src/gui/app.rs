//! Dashboard Main Application
//! Main window with control panel, table, and chart sections.

use crate::config::AppConfig;
use crate::data::{DashboardView, DataLoader, DataProcessor, GameTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, TableView};
use egui::{Color32, RichText, SidePanel, TextureHandle, TextureOptions};
use std::path::Path;

const BANNER_MAX_WIDTH: f32 = 640.0;

/// Everything shown once the dataset has loaded.
struct Dashboard {
    table: GameTable,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: Option<DashboardView>,
    table_view: TableView,
    view_error: Option<String>,
}

impl Dashboard {
    fn new(table: GameTable) -> Self {
        let mut dashboard = Self {
            control_panel: ControlPanel::new(&table),
            table,
            chart_viewer: ChartViewer::new(),
            view: None,
            table_view: TableView::default(),
            view_error: None,
        };
        dashboard.rebuild_view();
        dashboard
    }

    /// Recompute the whole view from the source table.
    fn rebuild_view(&mut self) {
        let result = DataProcessor::build_view(&self.table, &self.control_panel.selection)
            .and_then(|view| Ok((TableView::from_dataframe(&view.table)?, view)));

        match result {
            Ok((table_view, view)) => {
                tracing::debug!(
                    "View rebuilt: {} rows, {} charts",
                    view.table.height(),
                    view.column_charts.len()
                );
                self.table_view = table_view;
                self.view = Some(view);
                self.view_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to build view: {}", e);
                self.view = None;
                self.view_error = Some(e.to_string());
            }
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::QuadrantChanged => {
                let games = self.table.games_in(&self.control_panel.selection.quadrant);
                self.control_panel.reset_games(games);
                self.rebuild_view();
            }
            ControlPanelAction::SelectionChanged => self.rebuild_view(),
            ControlPanelAction::None => {}
        }
    }

    fn show_content(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.view_error {
            ui.label(RichText::new(format!("Error: {}", error)).color(Color32::from_rgb(220, 53, 69)));
            return;
        }
        let Some(view) = &self.view else {
            return;
        };

        Self::section_heading(ui, &format!("Games in {} Quadrant", view.quadrant));
        self.table_view.show(ui);

        ui.add_space(15.0);
        Self::section_heading(ui, "Charts for Selected Games and Columns");
        self.chart_viewer
            .show_column_charts(ui, &view.column_charts, view.chart_kind);

        ui.add_space(15.0);
        Self::section_heading(ui, "Overall Chart for Selected Column in Full Dataset");
        self.chart_viewer.show_overall(ui, &view.overall);
    }

    fn section_heading(ui: &mut egui::Ui, text: &str) {
        ui.separator();
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(6.0);
    }
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    dashboard: Result<Dashboard, String>,
    banner: Option<TextureHandle>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let dashboard = DataLoader::load_csv(&config.data_path)
            .map(Dashboard::new)
            .map_err(|e| {
                tracing::error!("Dashboard halted: {}", e);
                e.to_string()
            });

        let banner = match &dashboard {
            Ok(_) => Self::load_banner(&cc.egui_ctx, &config.image_path),
            Err(_) => None,
        };

        Self {
            config,
            dashboard,
            banner,
        }
    }

    /// Load the decorative image; failures only cost the image.
    fn load_banner(ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        let image = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                tracing::warn!("Skipping image {}: {}", path.display(), e);
                return None;
            }
        };
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        tracing::debug!("Loaded image {} ({}x{})", path.display(), size[0], size[1]);
        Some(ctx.load_texture("banner", color_image, TextureOptions::LINEAR))
    }

    fn show_title(ui: &mut egui::Ui, title: &str) {
        ui.add_space(8.0);
        ui.label(RichText::new(title).size(28.0).strong());
        ui.add_space(8.0);
    }

    /// Error screen for a dataset that failed to load: the error and the note, nothing else.
    fn show_halted(ctx: &egui::Context, error: &str, note: &str) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_rgb(253, 236, 236))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(error)
                            .size(14.0)
                            .color(Color32::from_rgb(156, 0, 6)),
                    );
                });
            ui.add_space(8.0);
            egui::Frame::none()
                .fill(Color32::from_rgb(232, 242, 252))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(note)
                            .size(13.0)
                            .color(Color32::from_rgb(0, 66, 128)),
                    );
                });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.dashboard {
            Ok(dashboard) => {
                SidePanel::left("control_panel")
                    .min_width(280.0)
                    .max_width(340.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            let action = dashboard.control_panel.show(ui);
                            dashboard.handle_action(action);
                        });
                    });

                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            Self::show_title(ui, &self.config.window_title);
                            ui.label(
                                RichText::new(format!("{} games loaded", dashboard.table.height()))
                                    .color(Color32::GRAY),
                            );
                            if let Some(banner) = &self.banner {
                                ui.add(egui::Image::new(banner).max_width(BANNER_MAX_WIDTH));
                                ui.add_space(10.0);
                            }
                            dashboard.show_content(ui);
                        });
                });
            }
            Err(error) => Self::show_halted(ctx, error, &self.config.footer_note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::epaint::Shape;

    fn collect_texts(shape: &Shape, out: &mut Vec<String>) {
        match shape {
            Shape::Text(text) => out.push(text.galley.text().to_string()),
            Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_texts(s, out)),
            _ => {}
        }
    }

    #[test]
    fn halted_screen_shows_only_error_and_note() {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            DashboardApp::show_halted(ctx, "Data file not found: game_data.csv", "Check the data path.");
        });

        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_texts(&clipped.shape, &mut texts);
        }
        assert_eq!(
            texts,
            vec![
                "Data file not found: game_data.csv".to_string(),
                "Check the data path.".to_string()
            ]
        );
        assert!(!texts.contains(&AppConfig::default().window_title));
    }
}

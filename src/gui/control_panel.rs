//! Control Panel Widget
//! Left side panel with the quadrant, game, column and chart selectors.

use crate::charts::ChartKind;
use crate::data::{GameTable, Selection};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Left side control panel. Options are always derived from the table, so
/// every selection it produces refers to values that exist.
pub struct ControlPanel {
    pub quadrants: Vec<String>,
    /// Games of the selected quadrant, in table order.
    pub games: Vec<String>,
    pub columns: Vec<String>,
    pub selected_cols: Vec<bool>,
    pub selection: Selection,
}

impl ControlPanel {
    pub fn new(table: &GameTable) -> Self {
        let selection = Selection::initial(table);
        let columns = table.columns();
        Self {
            quadrants: table.quadrants(),
            games: table.games_in(&selection.quadrant),
            selected_cols: vec![true; columns.len()],
            columns,
            selection,
        }
    }

    /// Replace the game list after a quadrant change; all games start selected.
    pub fn reset_games(&mut self, games: Vec<String>) {
        self.selection.games = games.iter().cloned().collect();
        self.games = games;
    }

    /// Selected columns in table order.
    pub fn get_selected_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.selected_cols.iter())
            .filter(|(_, &selected)| selected)
            .map(|(col, _)| col.clone())
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎮 Cultural Fit")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Quadrant =====
        ui.label(RichText::new("Select Quadrant").size(14.0).strong());
        ui.add_space(5.0);
        ComboBox::from_id_salt("quadrant")
            .width(220.0)
            .selected_text(&self.selection.quadrant)
            .show_ui(ui, |ui| {
                for quadrant in &self.quadrants {
                    if ui
                        .selectable_label(self.selection.quadrant == *quadrant, quadrant)
                        .clicked()
                        && self.selection.quadrant != *quadrant
                    {
                        self.selection.quadrant = quadrant.clone();
                        action = ControlPanelAction::QuadrantChanged;
                    }
                }
            });

        Self::section_break(ui);

        // ===== Games =====
        ui.label(RichText::new("Select Games to Display").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("games_scroll")
                    .max_height(180.0)
                    .show(ui, |ui| {
                        for game in &self.games {
                            let mut checked = self.selection.games.contains(game);
                            if ui.checkbox(&mut checked, game).changed() {
                                if checked {
                                    self.selection.games.insert(game.clone());
                                } else {
                                    self.selection.games.remove(game);
                                }
                                action = action.or(ControlPanelAction::SelectionChanged);
                            }
                        }
                    });
            });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selection.games = self.games.iter().cloned().collect();
                action = action.or(ControlPanelAction::SelectionChanged);
            }
            if ui.small_button("Clear All").clicked() {
                self.selection.games.clear();
                action = action.or(ControlPanelAction::SelectionChanged);
            }
        });

        Self::section_break(ui);

        // ===== Columns =====
        ui.label(RichText::new("Select Columns to Display").size(14.0).strong());
        ui.add_space(5.0);
        let mut columns_changed = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("columns_scroll")
                    .max_height(180.0)
                    .show(ui, |ui| {
                        for (i, col) in self.columns.iter().enumerate() {
                            if i < self.selected_cols.len()
                                && ui.checkbox(&mut self.selected_cols[i], col).changed()
                            {
                                columns_changed = true;
                            }
                        }
                    });
            });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_cols.iter_mut().for_each(|v| *v = true);
                columns_changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_cols.iter_mut().for_each(|v| *v = false);
                columns_changed = true;
            }
        });
        if columns_changed {
            self.selection.columns = self.get_selected_columns();
            action = action.or(ControlPanelAction::SelectionChanged);
        }

        Self::section_break(ui);

        // ===== Chart Type =====
        ui.label(RichText::new("Select Chart Type").size(14.0).strong());
        ui.add_space(5.0);
        ComboBox::from_id_salt("chart_kind")
            .width(220.0)
            .selected_text(self.selection.chart_kind.label())
            .show_ui(ui, |ui| {
                for kind in ChartKind::ALL {
                    if ui
                        .selectable_value(&mut self.selection.chart_kind, kind, kind.label())
                        .changed()
                    {
                        action = action.or(ControlPanelAction::SelectionChanged);
                    }
                }
            });

        Self::section_break(ui);

        // ===== Overall Column =====
        ui.label(
            RichText::new("Select Column for Overall Distribution Chart")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
        ComboBox::from_id_salt("overall_column")
            .width(220.0)
            .selected_text(&self.selection.overall_column)
            .show_ui(ui, |ui| {
                for col in &self.columns {
                    if ui
                        .selectable_value(&mut self.selection.overall_column, col.clone(), col)
                        .changed()
                    {
                        action = action.or(ControlPanelAction::SelectionChanged);
                    }
                }
            });

        action
    }

    fn section_break(ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    /// Quadrant changed; the game list must be rebuilt.
    QuadrantChanged,
    SelectionChanged,
}

impl ControlPanelAction {
    /// Keep the stronger of two actions.
    fn or(self, other: ControlPanelAction) -> ControlPanelAction {
        match self {
            ControlPanelAction::None => other,
            _ => self,
        }
    }
}

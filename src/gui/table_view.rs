//! Table View Widget
//! Striped grid of the filtered rows, indexed from zero.

use crate::data::column_text;
use egui::{RichText, ScrollArea};
use polars::prelude::*;

const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Text snapshot of a DataFrame, rebuilt whenever the view changes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = vec![Vec::with_capacity(headers.len()); df.height()];
        for column in df.get_columns() {
            for (row, value) in rows.iter_mut().zip(column_text(column)?) {
                row.push(value.unwrap_or_default());
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.headers.is_empty() {
            ui.label(RichText::new("No columns selected").italics());
            return;
        }

        ScrollArea::both()
            .id_salt("table_scroll")
            .max_height(MAX_TABLE_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("games_table")
                    .striped(true)
                    .min_col_width(40.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for header in &self.headers {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for (i, row) in self.rows.iter().enumerate() {
                            ui.label(RichText::new(i.to_string()).weak());
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

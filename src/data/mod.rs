//! Data module - CSV loading, filtering and aggregation

mod loader;
mod processor;
mod table;

pub use loader::DataLoader;
pub use processor::{DashboardView, DataProcessor, OverallChart, Selection, ValueCounts};
pub use table::{column_text, GameTable};

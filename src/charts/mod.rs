//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartKind, ChartPlotter};
pub use renderer::StaticChartRenderer;

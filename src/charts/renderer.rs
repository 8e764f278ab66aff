//! Static Chart Renderer
//! Rasterises pie charts with plotters, since egui_plot has no pie element.
//!
//! Layout: one pie centred in the image, a category label outside each
//! slice and its share of the total (one decimal) inside. The first slice
//! starts at twelve o'clock and slices follow counterclockwise.

use crate::charts::plotter::PALETTE;
use crate::data::ValueCounts;
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart rendering failed: {0}")]
    Draw(String),
}

/// Default raster size of a pie chart image.
pub const PIE_SIZE: (u32, u32) = (520, 360);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a pie chart into a packed RGB buffer of `width * height * 3` bytes.
    pub fn render_pie_rgb(
        counts: &ValueCounts,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(Self::draw_error)?;

            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.34;
            // plotters sweeps clockwise; drawing the slices in reverse order
            // lays them out counterclockwise from the top.
            let sizes: Vec<f64> = counts.entries.iter().rev().map(|(_, n)| *n as f64).collect();
            let colors: Vec<RGBColor> = Self::slice_colors(sizes.len()).into_iter().rev().collect();
            let labels: Vec<String> = counts.labels().into_iter().rev().collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 12).into_font().color(&BLACK));
            root.draw(&pie).map_err(Self::draw_error)?;
            root.present().map_err(Self::draw_error)?;
        }
        Ok(buffer)
    }

    /// Render a pie chart straight into an egui image.
    pub fn render_pie_image(counts: &ValueCounts) -> Result<egui::ColorImage, RenderError> {
        let (width, height) = PIE_SIZE;
        let rgb = Self::render_pie_rgb(counts, width, height)?;
        Ok(egui::ColorImage::from_rgb(
            [width as usize, height as usize],
            &rgb,
        ))
    }

    fn slice_colors(n: usize) -> Vec<RGBColor> {
        (0..n)
            .map(|i| {
                let c = PALETTE[i % PALETTE.len()];
                RGBColor(c.r(), c.g(), c.b())
            })
            .collect()
    }

    fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
        RenderError::Draw(e.to_string())
    }
}

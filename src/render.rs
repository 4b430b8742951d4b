//! Bitmap rendering of the calendar grid region.
//!
//! Stands in for the presentation layer's rendered region: draws the 42 cells
//! as a volatility heatmap with a performance strip per cell, giving the
//! export pipeline something to capture. Styling tokens and typography stay
//! with the real presentation layer; this is the minimal raster the document
//! needs.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use plotters::prelude::*;
use printpdf::image_crate::{DynamicImage, RgbImage};
use tokio::task;

use crate::export::RasterSource;
use crate::types::{GridCell, PerformanceType, VolatilityLevel};

const GRID_COLS: u32 = 7;
const GRID_ROWS: u32 = 6;

fn volatility_color(level: VolatilityLevel) -> RGBColor {
    match level {
        VolatilityLevel::Low => RGBColor(198, 227, 180),
        VolatilityLevel::Medium => RGBColor(250, 222, 135),
        VolatilityLevel::High => RGBColor(247, 168, 98),
        VolatilityLevel::Extreme => RGBColor(222, 92, 84),
    }
}

fn performance_color(kind: PerformanceType) -> RGBColor {
    match kind {
        PerformanceType::Bull => RGBColor(46, 139, 87),
        PerformanceType::Bear => RGBColor(178, 34, 34),
        PerformanceType::Neutral => RGBColor(128, 128, 128),
    }
}

/// Draws the grid into an RGB buffer. Blocking; callers go through
/// [`GridRenderer::rasterize`] which moves this off the async runtime.
fn draw(cells: &[GridCell], width: u32, height: u32) -> Result<RgbImage> {
    let mut buf = vec![0u8; (width as usize) * (height as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("fill raster: {e}"))?;

        let cell_w = (width / GRID_COLS) as i32;
        let cell_h = (height / GRID_ROWS) as i32;

        for (idx, cell) in cells.iter().enumerate() {
            let col = (idx as u32 % GRID_COLS) as i32;
            let row = (idx as u32 / GRID_COLS) as i32;
            let x0 = col * cell_w;
            let y0 = row * cell_h;
            let x1 = x0 + cell_w - 2;
            let y1 = y0 + cell_h - 2;

            let fill = if cell.record.is_some() {
                volatility_color(cell.volatility_level)
            } else {
                RGBColor(238, 238, 238)
            };
            let style: ShapeStyle = if cell.is_in_current_month {
                fill.filled()
            } else {
                fill.mix(0.35).filled()
            };
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], style))
                .map_err(|e| anyhow!("draw cell: {e}"))?;

            if cell.record.is_some() {
                let strip_top = y1 - (cell_h / 8).max(2);
                root.draw(&Rectangle::new(
                    [(x0, strip_top), (x1, y1)],
                    performance_color(cell.performance_type).filled(),
                ))
                .map_err(|e| anyhow!("draw strip: {e}"))?;
            }

            if cell.is_selected {
                root.draw(&Rectangle::new(
                    [(x0, y0), (x1, y1)],
                    RGBColor(25, 80, 200).stroke_width(3),
                ))
                .map_err(|e| anyhow!("draw selection: {e}"))?;
            } else if cell.is_today {
                root.draw(&Rectangle::new(
                    [(x0, y0), (x1, y1)],
                    RGBColor(40, 40, 40).stroke_width(2),
                ))
                .map_err(|e| anyhow!("draw today marker: {e}"))?;
            }
        }

        root.present().map_err(|e| anyhow!("present raster: {e}"))?;
    }

    RgbImage::from_raw(width, height, buf).ok_or_else(|| anyhow!("raster buffer size mismatch"))
}

/// Concrete [`RasterSource`] over the built grid. Unmounted until the first
/// [`GridRenderer::mount`], during which exports are skipped.
pub struct GridRenderer {
    width: u32,
    height: u32,
    cells: Option<Vec<GridCell>>,
}

impl GridRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: None,
        }
    }

    /// Replaces the rendered cells wholesale, mirroring how the grid itself
    /// is rebuilt rather than mutated.
    pub fn mount(&mut self, cells: Vec<GridCell>) {
        self.cells = Some(cells);
    }

    pub fn is_mounted(&self) -> bool {
        self.cells.is_some()
    }
}

#[async_trait]
impl RasterSource for GridRenderer {
    async fn rasterize(&self) -> Result<Option<DynamicImage>> {
        let cells = match &self.cells {
            Some(cells) => cells.clone(),
            None => return Ok(None),
        };
        let (width, height) = (self.width, self.height);
        let image = task::spawn_blocking(move || draw(&cells, width, height)).await??;
        Ok(Some(DynamicImage::ImageRgb8(image)))
    }
}

//! View-to-document export: raster capture composed onto a single A4 page.
//!
//! Rasterization is the only suspending step; page composition and the save
//! run synchronously once the bitmap is in hand. An unmounted region is a
//! silent skip, never an error and never a partial file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use crate::logging::{json_log, obj, v_num, v_str};

const EMBED_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

// =============================================================================
// Page geometry
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub width_mm: f64,
    pub height_mm: f64,
}

pub const A4_PORTRAIT: PageMetrics = PageMetrics {
    width_mm: 210.0,
    height_mm: 297.0,
};

/// Where the bitmap lands on the page, in millimetres from the bottom-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Scales an image onto the page preserving aspect ratio: fit to the page
/// width first, fall back to fit-to-height when that would overflow, then
/// center. The image is never cropped.
pub fn fit_to_page(image_width: u32, image_height: u32, page: PageMetrics) -> PagePlacement {
    if image_width == 0 || image_height == 0 {
        return PagePlacement {
            x_mm: page.width_mm / 2.0,
            y_mm: page.height_mm / 2.0,
            width_mm: 0.0,
            height_mm: 0.0,
        };
    }
    let aspect = image_width as f64 / image_height as f64;
    let mut width_mm = page.width_mm;
    let mut height_mm = page.width_mm / aspect;
    if height_mm > page.height_mm {
        height_mm = page.height_mm;
        width_mm = page.height_mm * aspect;
    }
    PagePlacement {
        x_mm: (page.width_mm - width_mm) / 2.0,
        y_mm: (page.height_mm - height_mm) / 2.0,
        width_mm,
        height_mm,
    }
}

// =============================================================================
// Raster source seam
// =============================================================================

/// Capture of an externally-rendered visual region.
#[async_trait]
pub trait RasterSource: Send + Sync {
    /// `Ok(None)` means the region is not mounted yet; the exporter treats
    /// that as a no-op.
    async fn rasterize(&self) -> Result<Option<DynamicImage>>;
}

// =============================================================================
// Exporter
// =============================================================================

pub struct DocumentExporter {
    app_name: String,
    page: PageMetrics,
    out_dir: PathBuf,
}

impl DocumentExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_name: "Fiscal".to_string(),
            page: A4_PORTRAIT,
            out_dir: out_dir.into(),
        }
    }

    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.app_name = app_name.to_string();
        self
    }

    pub fn with_page(mut self, page: PageMetrics) -> Self {
        self.page = page;
        self
    }

    /// Awaits rasterization of `source`, composes the bitmap onto a single
    /// page, and saves `<app_name>-<symbol>.pdf` in the output directory.
    ///
    /// Returns `Ok(None)` without touching the filesystem when the region is
    /// not mounted.
    pub async fn export(&self, source: &dyn RasterSource, symbol: &str) -> Result<Option<PathBuf>> {
        let bitmap = match source.rasterize().await? {
            Some(bitmap) => bitmap,
            None => {
                json_log(
                    "export",
                    obj(&[
                        ("event", v_str("skipped")),
                        ("reason", v_str("region_not_mounted")),
                        ("symbol", v_str(symbol)),
                    ]),
                );
                return Ok(None);
            }
        };

        let path = self.out_dir.join(format!("{}-{}.pdf", self.app_name, symbol));
        self.compose(&bitmap, &path)?;

        let (w, h) = bitmap.dimensions();
        json_log(
            "export",
            obj(&[
                ("event", v_str("saved")),
                ("symbol", v_str(symbol)),
                ("path", v_str(&path.to_string_lossy())),
                ("raster_w", v_num(f64::from(w))),
                ("raster_h", v_num(f64::from(h))),
            ]),
        );
        Ok(Some(path))
    }

    fn compose(&self, bitmap: &DynamicImage, path: &Path) -> Result<()> {
        let (w, h) = bitmap.dimensions();
        let placement = fit_to_page(w, h, self.page);

        let (doc, page_idx, layer_idx) = PdfDocument::new(
            &self.app_name,
            Mm(self.page.width_mm as f32),
            Mm(self.page.height_mm as f32),
            "calendar",
        );
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        // printpdf sizes embedded images by dpi; scale from the natural size
        // at EMBED_DPI to the fitted placement
        let natural_w_mm = f64::from(w) / EMBED_DPI * MM_PER_INCH;
        let natural_h_mm = f64::from(h) / EMBED_DPI * MM_PER_INCH;
        let image = Image::from_dynamic_image(bitmap);
        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(placement.x_mm as f32)),
                translate_y: Some(Mm(placement.y_mm as f32)),
                scale_x: Some((placement.width_mm / natural_w_mm) as f32),
                scale_y: Some((placement.height_mm / natural_h_mm) as f32),
                dpi: Some(EMBED_DPI as f32),
                ..Default::default()
            },
        );

        let file = File::create(path)
            .with_context(|| format!("create export file {}", path.display()))?;
        doc.save(&mut BufWriter::new(file))
            .with_context(|| format!("write document {}", path.display()))?;
        Ok(())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rendering: rasterise PDF pages to PNG through the pdfium library,
// which is bound at runtime.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use pdfworks_core::ArchiveEntry;
use pdfworks_core::error::{PdfWorksError, Result};
use tracing::{debug, info, instrument};

use crate::image::ImageProcessor;

/// Renders PDF pages with a bound pdfium library.
pub struct PageRenderer {
    pdfium: Pdfium,
}

impl PageRenderer {
    /// Bind pdfium, preferring a copy next to the working directory over the
    /// system-wide library.
    ///
    /// Failure to bind is reported as [`PdfWorksError::DependencyUnavailable`].
    pub fn bind() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|err| PdfWorksError::DependencyUnavailable(format!("pdfium: {}", err)))?;

        debug!("pdfium bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Render every page of the PDF at `path` at `scale`, encoded as PNG
    /// entries named `page-{n}.png` in page order.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn render_to_png(&self, path: impl AsRef<Path>, scale: f32) -> Result<Vec<ArchiveEntry>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path.as_ref(), None)
            .map_err(|err| PdfWorksError::PdfError(format!("failed to open PDF: {}", err)))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let mut entries = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|err| PdfWorksError::RenderError(format!("page {}: {}", index + 1, err)))?;

            let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
            let pixels = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec()).ok_or_else(|| {
                PdfWorksError::RenderError(format!(
                    "page {}: bitmap size does not match {}x{}",
                    index + 1,
                    width,
                    height
                ))
            })?;

            let png = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(pixels)).to_png_bytes()?;
            debug!(page = index + 1, width, height, png_bytes = png.len(), "Page rendered");
            entries.push(ArchiveEntry::page(index + 1, "png", png));
        }

        info!(pages = entries.len(), scale, "Rendering complete");
        Ok(entries)
    }
}

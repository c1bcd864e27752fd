// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: create new PDF documents from raster images using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use pdfworks_core::error::{PdfWorksError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::ImageProcessor;

/// One image pixel maps to one PDF point.
const IMAGE_DPI: f32 = 72.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Document title written to /Info.
const TITLE: &str = "Images";

/// Creates new PDF documents with one page per image.
#[derive(Debug, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    // -- Images to PDF --------------------------------------------------------

    /// Create a multi-page PDF, one page per image, in the order given.
    ///
    /// Each page is exactly the size of its image at 72 dpi. Images with an
    /// alpha channel are flattened to RGB first; grayscale stays grayscale.
    #[instrument(skip_all, fields(images = images.len()))]
    pub fn create_from_images(&self, images: Vec<ImageProcessor>) -> Result<Vec<u8>> {
        if images.is_empty() {
            return Err(PdfWorksError::NoInputs);
        }

        info!("Creating image PDF");

        let mut doc = PdfDocument::new(TITLE);
        let mut pages = Vec::with_capacity(images.len());

        // Consume the images one by one so each decoded buffer is released as
        // soon as it has been embedded.
        for (index, processor) in images.into_iter().enumerate() {
            let (width, height) = (processor.width(), processor.height());
            let raw = to_raw_image(processor.flatten());
            let xobject_id = doc.add_image(&raw);

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }];

            let page_w = Mm(width as f32 * MM_PER_PT);
            let page_h = Mm(height as f32 * MM_PER_PT);
            pages.push(PdfPage::new(page_w, page_h, ops));

            debug!(page = index + 1, width, height, "Image placed on page");
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }

    /// Open every image path, in order, and build a PDF from them.
    ///
    /// If any image fails to open, the ones already decoded are dropped before
    /// the error is returned.
    pub fn create_from_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<u8>> {
        let images = paths
            .iter()
            .map(|path| ImageProcessor::open(path))
            .collect::<Result<Vec<_>>>()?;
        self.create_from_images(images)
    }
}

/// Convert a flattened image into printpdf's raw pixel representation.
fn to_raw_image(processor: ImageProcessor) -> RawImage {
    let image = processor.into_dynamic();
    let (width, height) = (image.width() as usize, image.height() as usize);

    let (pixels, data_format) = match image {
        ::image::DynamicImage::ImageLuma8(gray) => (gray.into_raw(), RawImageFormat::R8),
        other => (other.to_rgb8().into_raw(), RawImageFormat::RGB8),
    };

    RawImage {
        pixels: RawImageData::U8(pixels),
        width,
        height,
        data_format,
        tag: Vec::new(),
    }
}

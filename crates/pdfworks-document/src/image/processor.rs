// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: load, flatten, and encode raster images with the `image`
// crate.

use image::{DynamicImage, ImageFormat};
use pdfworks_core::error::PdfWorksError;
use tracing::{debug, info, instrument};

/// A single decoded, in-memory image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so
/// intermediate buffers are freed as soon as they are replaced.
///
/// ```ignore
/// let png = ImageProcessor::open("photo.png")?
///     .flatten()
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PdfWorksError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            PdfWorksError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Drop the alpha channel, producing plain RGB.
    ///
    /// Alpha is discarded, not composited over a background: a fully
    /// transparent pixel keeps its underlying colour. Images without alpha
    /// are returned untouched. Palette images are already expanded by the
    /// decoder, so they fall under the same rule.
    #[instrument(skip(self))]
    pub fn flatten(self) -> Self {
        if !self.has_alpha() {
            return self;
        }
        debug!(from = ?self.image.color(), "Flattening to RGB");
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PdfWorksError> {
        let mut buffer = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| PdfWorksError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba, RgbaImage};

    #[test]
    fn flatten_discards_alpha_without_compositing() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 20, 0]));
        let flat = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(rgba)).flatten();

        assert!(!flat.has_alpha());
        let flat = flat.into_dynamic();
        assert_eq!(flat.color(), ColorType::Rgb8);
        let pixel = flat.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(pixel, [200, 10, 20]);
    }

    #[test]
    fn flatten_leaves_grayscale_alone() {
        let gray = DynamicImage::new_luma8(3, 3);
        let flat = ImageProcessor::from_dynamic(gray).flatten();
        assert_eq!(flat.into_dynamic().color(), ColorType::L8);
    }

    #[test]
    fn png_round_trip_keeps_dimensions() {
        let processor = ImageProcessor::from_dynamic(DynamicImage::new_rgb8(7, 5));
        let png = processor.to_png_bytes().unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (7, 5));
    }

    #[test]
    fn undecodable_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = ImageProcessor::open(&path).err().unwrap();
        assert!(matches!(err, PdfWorksError::ImageError(message) if message.contains("broken.png")));
    }
}

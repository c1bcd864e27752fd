// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfworks-document: The library calls behind each pdfworks tool.
//
// Provides PDF operations (read, rebuild, merge, split, redact, lock, unlock),
// image-to-PDF conversion, page rendering through pdfium, ZIP packaging, and
// atomic output writing. `pipeline` strings these together, one function per
// tool.

pub mod archive;
pub mod image;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod render;

// Re-export the primary structs so callers can use `pdfworks_document::PdfReader` etc.
pub use crate::image::ImageProcessor;
pub use pdf::{DocumentBuilder, PdfMerger, PdfReader, PdfWriter, Redactor};
pub use render::PageRenderer;

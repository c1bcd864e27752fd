// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One function per tool: validate inputs, run the transform in memory, then
// write the output atomically. Nothing is written unless the whole transform
// succeeded.

use std::path::{Path, PathBuf};

use pdfworks_core::error::{PdfWorksError, Result};
use pdfworks_core::{RedactionReport, ToolConfig};
use tracing::{info, instrument};

use crate::archive::build_zip;
use crate::output::write_atomic;
use crate::pdf::{PdfMerger, PdfReader, PdfWriter, Redactor, security};
use crate::render::PageRenderer;

// -- Input validation ---------------------------------------------------------

/// Fail with [`PdfWorksError::MissingInput`] unless `path` is an existing file.
pub fn require_file(path: &Path, message: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PdfWorksError::MissingInput(format!("{} ({})", message, path.display())))
    }
}

/// Check a whole batch before any processing starts.
pub fn require_files(paths: &[PathBuf], message: &str) -> Result<()> {
    match paths.iter().find(|path| !path.is_file()) {
        Some(missing) => Err(PdfWorksError::MissingInput(format!(
            "{} ({})",
            message,
            missing.display()
        ))),
        None => Ok(()),
    }
}

// -- Tools --------------------------------------------------------------------

/// Combine images into one PDF, one page each. Returns the page count.
#[instrument(skip_all, fields(output = %output.display(), images = images.len()))]
pub fn images_to_pdf(output: &Path, images: &[PathBuf]) -> Result<usize> {
    require_files(images, "One or more input images are missing.")?;

    let bytes = PdfWriter::new().create_from_paths(images)?;
    write_atomic(output, &bytes)?;
    Ok(images.len())
}

/// Render every page to PNG and pack them into a ZIP. Returns the page count.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn pdf_to_images(input: &Path, output: &Path, config: &ToolConfig) -> Result<usize> {
    require_file(input, "Source PDF is missing.")?;

    let renderer = PageRenderer::bind()?;
    let entries = renderer.render_to_png(input, config.render_scale)?;
    write_atomic(output, &build_zip(&entries)?)?;
    Ok(entries.len())
}

/// Split into single-page PDFs packed into a ZIP. Returns the page count.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn split_pdf(input: &Path, output: &Path, config: &ToolConfig) -> Result<usize> {
    require_file(input, "Source file missing.")?;

    let mut reader = PdfReader::open(input)?;
    reader.set_output_version(config.pdf_version.as_str());
    let entries = reader.split_pages()?;
    write_atomic(output, &build_zip(&entries)?)?;
    Ok(entries.len())
}

/// Concatenate PDFs in the given order. Returns the merged page count.
#[instrument(skip_all, fields(output = %output.display(), inputs = inputs.len()))]
pub fn merge_pdf(output: &Path, inputs: &[PathBuf], config: &ToolConfig) -> Result<usize> {
    require_files(inputs, "One or more input PDFs are missing.")?;

    let mut merger = PdfMerger::new(&config.pdf_version);
    for input in inputs {
        merger.append(input)?;
    }
    let pages = merger.page_count();
    write_atomic(output, &merger.into_bytes()?)?;
    Ok(pages)
}

/// Encrypt with `password` as both user and owner password.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn lock_pdf(input: &Path, output: &Path, password: &str, config: &ToolConfig) -> Result<()> {
    require_file(input, "Source file missing.")?;
    if password.is_empty() {
        return Err(PdfWorksError::MissingPassword);
    }

    let reader = PdfReader::open(input)?;
    let bytes = security::lock(&reader, password, &config.pdf_version, config.encryption_key_bits)?;
    write_atomic(output, &bytes)
}

/// Remove password protection, keeping pages and metadata.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn unlock_pdf(input: &Path, output: &Path, password: &str, config: &ToolConfig) -> Result<()> {
    require_file(input, "Source file missing.")?;
    if password.is_empty() {
        return Err(PdfWorksError::MissingPassword);
    }

    let mut reader = PdfReader::open(input)?;
    let bytes = security::unlock(&mut reader, password, &config.pdf_version)?;
    write_atomic(output, &bytes)
}

/// Replace each term in every page's content stream with the marker.
#[instrument(skip_all, fields(input = %input.display(), terms = terms.len()))]
pub fn redact_pdf<S: AsRef<str>>(
    input: &Path,
    output: &Path,
    terms: &[S],
    config: &ToolConfig,
) -> Result<RedactionReport> {
    require_file(input, "Source PDF missing.")?;

    let redactor = Redactor::new(terms, &config.redaction_marker);
    let mut reader = PdfReader::open(input)?;
    let (bytes, report) = redactor.redact_document(&mut reader, &config.pdf_version)?;
    write_atomic(output, &bytes)?;

    info!(replacements = report.replacements, "Redacted PDF written");
    Ok(report)
}

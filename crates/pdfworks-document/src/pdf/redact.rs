// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Byte-level redaction of page content streams.
//
// Each term is replaced literally inside the decoded drawing-operator bytes.
// Text split across several show operators, or stored in a font-specific
// encoding, does not match and stays visible in the rendered page.

use std::io::Read;

use flate2::read::ZlibDecoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfworks_core::RedactionReport;
use pdfworks_core::error::Result;
use tracing::{debug, info, instrument, warn};

use super::builder::DocumentBuilder;
use super::reader::PdfReader;

/// Literal find-and-replace over page content streams.
#[derive(Debug, Clone)]
pub struct Redactor {
    terms: Vec<Vec<u8>>,
    marker: Vec<u8>,
}

impl Redactor {
    /// Build a redactor from raw search terms. Terms are trimmed; blank terms
    /// are dropped. Order is preserved.
    pub fn new<S: AsRef<str>>(terms: &[S], marker: &str) -> Self {
        Self {
            terms: normalize_terms(terms),
            marker: marker.as_bytes().to_vec(),
        }
    }

    /// Apply every term in order, each one to the output of the previous.
    /// Returns the new bytes and the number of replacements made.
    pub fn apply(&self, content: &[u8]) -> (Vec<u8>, usize) {
        let mut current = content.to_vec();
        let mut total = 0;
        for term in &self.terms {
            let (next, count) = replace_all(&current, term, &self.marker);
            current = next;
            total += count;
        }
        (current, total)
    }

    /// Redact every page of `reader` and rebuild the result into a new
    /// document.
    ///
    /// Pages without obtainable content bytes are copied unchanged and
    /// counted in [`RedactionReport::passed_through`].
    #[instrument(skip_all, fields(terms = self.terms.len()))]
    pub fn redact_document(&self, reader: &mut PdfReader, version: &str) -> Result<(Vec<u8>, RedactionReport)> {
        let page_ids = reader.page_ids();
        let mut report = RedactionReport {
            pages: page_ids.len(),
            ..Default::default()
        };

        let document = reader.document_mut();
        for (index, page_id) in page_ids.iter().enumerate() {
            let Some(content) = page_content(document, *page_id) else {
                debug!(page = index + 1, "No content bytes, page passed through");
                report.passed_through += 1;
                continue;
            };

            let (redacted, count) = self.apply(&content);
            replace_page_content(document, *page_id, redacted);
            report.rewritten += 1;
            report.replacements += count;
        }

        if !report.is_complete() {
            warn!(
                passed_through = report.passed_through,
                pages = report.pages,
                "Some pages had no readable content stream and were not redacted"
            );
        }

        let mut builder = DocumentBuilder::new(version);
        builder.copy_all_pages(reader.document())?;
        let output = builder.into_bytes()?;

        info!(
            pages = report.pages,
            rewritten = report.rewritten,
            replacements = report.replacements,
            "Redaction complete"
        );
        Ok((output, report))
    }
}

/// Trim each term and drop the blank ones, encoding the rest as UTF-8.
pub fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<Vec<u8>> {
    terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .map(|term| term.as_bytes().to_vec())
        .collect()
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to
/// right. Returns the new bytes and the number of replacements.
pub fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if needle.is_empty() || needle.len() > haystack.len() {
        return (haystack.to_vec(), 0);
    }

    let mut output = Vec::with_capacity(haystack.len());
    let mut count = 0;
    let mut position = 0;
    while position < haystack.len() {
        if haystack[position..].starts_with(needle) {
            output.extend_from_slice(replacement);
            position += needle.len();
            count += 1;
        } else {
            output.push(haystack[position]);
            position += 1;
        }
    }
    (output, count)
}

/// Decoded content bytes of a page, all of its content streams concatenated.
/// `None` when the page has no content stream, or when any of its streams is
/// missing or cannot be decoded.
fn page_content(document: &Document, page_id: ObjectId) -> Option<Vec<u8>> {
    let stream_ids = document.get_page_contents(page_id);
    if stream_ids.is_empty() {
        return None;
    }

    let mut content = Vec::new();
    for stream_id in stream_ids {
        let stream = document.get_object(stream_id).and_then(Object::as_stream).ok()?;
        match decode_stream(stream) {
            Some(bytes) => content.extend(bytes),
            None => {
                debug!(?stream_id, "Content stream could not be decoded");
                return None;
            }
        }
    }
    Some(content)
}

/// Apply a stream's filters. Unfiltered streams are returned as stored.
fn decode_stream(stream: &Stream) -> Option<Vec<u8>> {
    if !stream.dict.has(b"Filter") {
        return Some(stream.content.clone());
    }
    let filters = stream.filters().ok()?;

    // lopdf logs and swallows inflate errors, yielding truncated output, so
    // the Flate stage is checked here first.
    if filters.first().copied() == Some(b"FlateDecode".as_slice()) {
        let inflated = inflate(&stream.content)?;
        if filters.len() == 1 && !stream.dict.has(b"DecodeParms") {
            return Some(inflated);
        }
    }
    stream.decompressed_content().ok()
}

fn inflate(data: &[u8]) -> Option<Vec<u8>> {
    if data.is_empty() {
        return Some(Vec::new());
    }
    let mut output = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut output).ok()?;
    Some(output)
}

/// Point the page's /Contents at a single new, unfiltered stream.
fn replace_page_content(document: &mut Document, page_id: ObjectId, content: Vec<u8>) {
    let stream_id = document.add_object(Stream::new(Dictionary::new(), content));
    if let Ok(Object::Dictionary(page)) = document.get_object_mut(page_id) {
        page.set("Contents", Object::Reference(stream_id));
    }
}

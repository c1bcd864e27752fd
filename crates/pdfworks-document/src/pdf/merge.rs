// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF merger: incremental append of whole documents into one output.

use std::path::Path;

use pdfworks_core::error::Result;
use tracing::{debug, info, instrument};

use super::builder::DocumentBuilder;
use super::reader::PdfReader;

/// Concatenates documents one source at a time.
///
/// Each appended source is opened, its pages copied into the output, and then
/// dropped before the next source is read, so only one source document is
/// held in memory at once.
pub struct PdfMerger {
    builder: DocumentBuilder,
    sources: usize,
}

impl PdfMerger {
    /// Create an empty merger producing a document with the given header version.
    pub fn new(version: &str) -> Self {
        Self {
            builder: DocumentBuilder::new(version),
            sources: 0,
        }
    }

    /// Append every page of the PDF at `path`. Returns the number of pages added.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn append(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let reader = PdfReader::open(path)?;
        self.append_reader(&reader)
    }

    /// Append every page of an in-memory PDF.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<usize> {
        let reader = PdfReader::from_bytes(data)?;
        self.append_reader(&reader)
    }

    fn append_reader(&mut self, reader: &PdfReader) -> Result<usize> {
        let added = self.builder.copy_all_pages(reader.document())?;
        self.sources += 1;
        debug!(
            added,
            total = self.builder.page_count(),
            source = self.sources,
            "Source appended"
        );
        Ok(added)
    }

    /// Pages in the output so far.
    pub fn page_count(&self) -> usize {
        self.builder.page_count()
    }

    /// Sources appended so far.
    pub fn source_count(&self) -> usize {
        self.sources
    }

    /// Serialise the merged document.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        info!(
            sources = self.sources,
            pages = self.builder.page_count(),
            "Writing merged PDF"
        );
        self.builder.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{build_pdf, page_texts};
    use lopdf::Document;

    #[test]
    fn merge_preserves_source_then_page_order() {
        let mut merger = PdfMerger::new("1.5");
        assert_eq!(merger.append_bytes(&build_pdf(&["A1", "A2"])).unwrap(), 2);
        assert_eq!(merger.append_bytes(&build_pdf(&["B1", "B2", "B3"])).unwrap(), 3);
        assert_eq!(merger.page_count(), 5);
        assert_eq!(merger.source_count(), 2);

        let doc = Document::load_mem(&merger.into_bytes().unwrap()).unwrap();
        assert_eq!(page_texts(&doc), vec!["A1", "A2", "B1", "B2", "B3"]);
    }

    #[test]
    fn merging_same_source_twice_duplicates_pages() {
        let source = build_pdf(&["X"]);
        let mut merger = PdfMerger::new("1.5");
        merger.append_bytes(&source).unwrap();
        merger.append_bytes(&source).unwrap();

        let doc = Document::load_mem(&merger.into_bytes().unwrap()).unwrap();
        assert_eq!(page_texts(&doc), vec!["X", "X"]);
    }

    #[test]
    fn bad_source_aborts_append() {
        let mut merger = PdfMerger::new("1.5");
        assert!(merger.append_bytes(b"%PDF-garbage").is_err());
        assert_eq!(merger.source_count(), 0);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZIP packaging for multi-file outputs.

use std::io::{Cursor, Write};

use pdfworks_core::ArchiveEntry;
use pdfworks_core::error::{PdfWorksError, Result};
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Pack `entries` into an in-memory, DEFLATE-compressed ZIP, preserving
/// their order.
pub fn build_zip(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|err| PdfWorksError::ArchiveError(format!("{}: {}", entry.name, err)))?;
        writer.write_all(&entry.bytes)?;
    }

    let cursor = writer
        .finish()
        .map_err(|err| PdfWorksError::ArchiveError(err.to_string()))?;
    let bytes = cursor.into_inner();

    debug!(entries = entries.len(), zip_bytes = bytes.len(), "Archive built");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn entries_keep_names_order_and_content() {
        let entries = vec![
            ArchiveEntry::page(1, "pdf", b"first".to_vec()),
            ArchiveEntry::page(2, "pdf", b"second".to_vec()),
        ];
        let bytes = build_zip(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut file = archive.by_index(1).unwrap();
        assert_eq!(file.name(), "page-2.pdf");
        assert_eq!(file.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn empty_archive_is_valid() {
        let bytes = build_zip(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}

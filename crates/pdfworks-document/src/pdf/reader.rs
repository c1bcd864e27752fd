// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open, inspect, decrypt, and split existing PDF documents using
// the `lopdf` crate.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use lopdf::encryption::{DecryptionError, EncryptionState, PasswordAlgorithm, decrypt_object};
use lopdf::xref::XrefEntry;
use lopdf::{Document, Object, ObjectId, ObjectStream, Reader};
use pdfworks_core::ArchiveEntry;
use pdfworks_core::error::{PdfWorksError, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use super::builder::{DocumentBuilder, ObjectCopier};

/// Reads and manipulates an existing PDF file.
///
/// Wraps `lopdf::Document` together with a SHA-256 fingerprint of the bytes
/// it was loaded from.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// SHA-256 of the source bytes.
    fingerprint: [u8; 32],
    /// Source bytes of a document whose objects are still sealed behind a
    /// non-empty password. lopdf only loads the /Encrypt dictionary in that
    /// case, so the objects are parsed again from here by `decrypt`.
    sealed_source: Option<Vec<u8>>,
    /// Header version for documents rebuilt from this one.
    output_version: String,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let data = std::fs::read(path_ref)?;
        Self::from_bytes(&data).map_err(|err| match err {
            PdfWorksError::PdfError(detail) => {
                PdfWorksError::PdfError(format!("failed to open {}: {}", path_ref.display(), detail))
            }
            other => other,
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| PdfWorksError::PdfError(format!("failed to load PDF: {}", err)))?;

        debug!(
            pages = document.get_pages().len(),
            encrypted = document.is_encrypted(),
            "PDF loaded"
        );

        let sealed_source =
            (document.is_encrypted() && document.encryption_state.is_none()).then(|| data.to_vec());

        Ok(Self {
            document,
            fingerprint: Sha256::digest(data).into(),
            sealed_source,
            output_version: "1.5".to_string(),
        })
    }

    /// Set the header version used by [`PdfReader::extract_page`] and
    /// [`PdfReader::split_pages`].
    pub fn set_output_version(&mut self, version: impl Into<String>) {
        self.output_version = version.into();
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page object ids in document order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().into_values().collect()
    }

    /// Whether the document still carries an /Encrypt dictionary.
    pub fn is_encrypted(&self) -> bool {
        self.document.is_encrypted()
    }

    /// SHA-256 of the bytes the document was loaded from.
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    // -- Decryption -----------------------------------------------------------

    /// Decrypt the document in place.
    ///
    /// Any failure to derive a matching key is reported as
    /// [`PdfWorksError::InvalidPassword`]. A document that is not encrypted is
    /// left untouched.
    #[instrument(skip_all)]
    pub fn decrypt(&mut self, password: &str) -> Result<()> {
        if !self.document.is_encrypted() {
            return Ok(());
        }

        self.document.authenticate_password(password).map_err(rejected)?;

        // Without a sealed source lopdf already decrypted the objects while
        // loading with the empty user password.
        if let Some(source) = self.sealed_source.as_deref() {
            let objects = unseal(&self.document, source, password).map_err(rejected)?;
            self.document.objects.extend(objects);
            self.sealed_source = None;
        }

        if let Ok(id) = self.document.trailer.get(b"Encrypt").and_then(Object::as_reference) {
            self.document.objects.remove(&id);
        }
        self.document.trailer.remove(b"Encrypt");
        self.document.encryption_state = None;
        info!(objects = self.document.objects.len(), "PDF decrypted");
        Ok(())
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract a single page (1-indexed) into a new standalone PDF document.
    ///
    /// Returns the serialised bytes of the single-page PDF.
    #[instrument(skip(self))]
    pub fn extract_page(&self, page_number: u32) -> Result<Vec<u8>> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            PdfWorksError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        // Each page gets its own copier so no object graph is shared between
        // output files.
        let mut builder = DocumentBuilder::new(&self.output_version);
        let mut copier = ObjectCopier::new(&self.document);
        builder.copy_page(&mut copier, page_id)?;
        let output = builder.into_bytes()?;

        debug!(page_number, output_bytes = output.len(), "Page extracted");
        Ok(output)
    }

    /// Split the document into one single-page PDF per page, named
    /// `page-{n}.pdf`.
    #[instrument(skip(self))]
    pub fn split_pages(&self) -> Result<Vec<ArchiveEntry>> {
        let total = self.page_count();
        if total == 0 {
            return Err(PdfWorksError::EmptyDocument);
        }

        info!(total, "Splitting PDF");

        (1..=total)
            .map(|number| {
                let bytes = self.extract_page(number as u32)?;
                Ok(ArchiveEntry::page(number, "pdf", bytes))
            })
            .collect()
    }
}

/// Parse every indirect object of `document` from `source` and decrypt it
/// with the key derived from `password`.
fn unseal(document: &Document, source: &[u8], password: &str) -> lopdf::Result<BTreeMap<ObjectId, Object>> {
    let key = PasswordAlgorithm::try_from(document)?.sanitize_password(password)?;
    let state = EncryptionState::decode(document, &key)?;
    let encrypt_id = document.trailer.get(b"Encrypt").and_then(Object::as_reference).ok();

    // Xref offsets are relative to the "%PDF-" header.
    let start = source.windows(5).position(|window| window == b"%PDF-").unwrap_or(0);
    let mut index = Document::new();
    index.reference_table = document.reference_table.clone();
    let parser = Reader {
        buffer: &source[start..],
        document: index,
        encryption_state: None,
        raw_objects: BTreeMap::new(),
    };

    let mut objects = BTreeMap::new();
    for (&number, entry) in &document.reference_table.entries {
        let XrefEntry::Normal { generation, .. } = *entry else {
            continue;
        };
        let id = (number, generation);
        if Some(id) == encrypt_id {
            continue;
        }
        let mut object = match parser.get_object(id, &mut HashSet::new()) {
            Ok(object) => object,
            Err(err) => {
                debug!(?id, %err, "Skipping unreadable object");
                continue;
            }
        };
        decrypt_object(&state, id, &mut object)?;
        objects.insert(id, object);
    }

    // Objects packed in object streams are only readable once their container
    // has been decrypted.
    let mut packed = Vec::new();
    for object in objects.values_mut() {
        if let Ok(stream) = object.as_stream_mut()
            && stream.dict.has_type(b"ObjStm")
            && let Ok(container) = ObjectStream::new(stream)
        {
            packed.extend(container.objects);
        }
    }
    for (id, object) in packed {
        objects.entry(id).or_insert(object);
    }

    Ok(objects)
}

/// Map a lopdf decryption error to `InvalidPassword`. Failures other than a
/// wrong password are logged as warnings.
fn rejected(err: lopdf::Error) -> PdfWorksError {
    match err {
        lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => {
            debug!(%err, "Decryption rejected");
        }
        _ => warn!(%err, "Decryption failed"),
    }
    PdfWorksError::InvalidPassword
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{build_pdf, page_texts};

    #[test]
    fn reports_page_count_and_fingerprint() {
        let bytes = build_pdf(&["a", "b"]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 2);
        assert!(!reader.is_encrypted());
        assert_eq!(reader.fingerprint().as_slice(), Sha256::digest(&bytes).as_slice());
    }

    #[test]
    fn every_decryption_failure_is_an_invalid_password() {
        let wrong = lopdf::Error::Decryption(DecryptionError::IncorrectPassword);
        let foreign = lopdf::Error::UnsupportedSecurityHandler(b"Adobe.PubSec".to_vec());
        assert!(matches!(rejected(wrong), PdfWorksError::InvalidPassword));
        assert!(matches!(rejected(foreign), PdfWorksError::InvalidPassword));
    }

    #[test]
    fn decrypting_plain_document_is_a_no_op() {
        let mut reader = PdfReader::from_bytes(&build_pdf(&["a"])).unwrap();
        reader.decrypt("anything").unwrap();
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn rejects_garbage() {
        let err = PdfReader::from_bytes(b"not a pdf").err().unwrap();
        assert!(matches!(err, PdfWorksError::PdfError(_)));
    }

    #[test]
    fn extract_page_is_standalone() {
        let reader = PdfReader::from_bytes(&build_pdf(&["first", "second"])).unwrap();
        let page = reader.extract_page(2).unwrap();
        let doc = Document::load_mem(&page).unwrap();
        assert_eq!(page_texts(&doc), vec!["second"]);
    }

    #[test]
    fn extract_page_out_of_range() {
        let reader = PdfReader::from_bytes(&build_pdf(&["only"])).unwrap();
        assert!(reader.extract_page(0).is_err());
        assert!(reader.extract_page(2).is_err());
    }

    #[test]
    fn split_names_entries_in_page_order() {
        let reader = PdfReader::from_bytes(&build_pdf(&["p1", "p2", "p3"])).unwrap();
        let entries = reader.split_pages().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["page-1.pdf", "page-2.pdf", "page-3.pdf"]);

        for (index, entry) in entries.iter().enumerate() {
            let doc = Document::load_mem(&entry.bytes).unwrap();
            assert_eq!(page_texts(&doc), vec![format!("p{}", index + 1)]);
        }
    }

    #[test]
    fn split_empty_document_fails() {
        let reader = PdfReader::from_bytes(&build_pdf(&[])).unwrap();
        assert!(matches!(
            reader.split_pages().unwrap_err(),
            PdfWorksError::EmptyDocument
        ));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Password protection: lock (encrypt) and unlock (decrypt) whole documents
// with the standard security handler.

use lopdf::encryption::{EncryptionState, EncryptionVersion, Permissions};
use pdfworks_core::error::{PdfWorksError, Result};
use tracing::{debug, info, instrument};

use super::builder::{DocumentBuilder, save_to_bytes};
use super::reader::PdfReader;

/// Rebuild `reader`'s pages into a new document encrypted with `password`.
///
/// The same password is used for both the user and the owner role. The
/// trailer /ID is derived from the source fingerprint, since the RC4 key is
/// keyed on it.
#[instrument(skip(reader, password))]
pub fn lock(reader: &PdfReader, password: &str, version: &str, key_bits: usize) -> Result<Vec<u8>> {
    if password.is_empty() {
        return Err(PdfWorksError::MissingPassword);
    }

    let mut builder = DocumentBuilder::new(version);
    let pages = builder.copy_all_pages(reader.document())?;
    builder.copy_metadata(reader.document());

    let file_id = &reader.fingerprint()[..16];
    debug!(file_id = %hex::encode(file_id), "Assigning file identifier");
    builder.set_file_id(file_id);

    let mut document = builder.finish();
    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &document,
        owner_password: password,
        user_password: password,
        key_length: key_bits,
        permissions: Permissions::all(),
    })
    .map_err(|err| PdfWorksError::Encryption(err.to_string()))?;

    document
        .encrypt(&state)
        .map_err(|err| PdfWorksError::Encryption(err.to_string()))?;

    info!(pages, key_bits, "PDF locked");
    save_to_bytes(&mut document)
}

/// Decrypt `reader` if needed and rebuild its pages and metadata into a new,
/// unencrypted document.
#[instrument(skip_all)]
pub fn unlock(reader: &mut PdfReader, password: &str, version: &str) -> Result<Vec<u8>> {
    if password.is_empty() {
        return Err(PdfWorksError::MissingPassword);
    }

    if reader.is_encrypted() {
        reader.decrypt(password)?;
    } else {
        debug!("PDF is not encrypted, copying as-is");
    }

    let mut builder = DocumentBuilder::new(version);
    let pages = builder.copy_all_pages(reader.document())?;
    let metadata = builder.copy_metadata(reader.document());

    info!(pages, metadata, "PDF unlocked");
    builder.into_bytes()
}

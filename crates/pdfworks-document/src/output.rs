// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output files appear whole or not at all.

use std::io::Write;
use std::path::Path;

use pdfworks_core::error::{PdfWorksError, Result};
use tracing::info;

/// Write `bytes` to a temporary file beside `path`, then rename it over
/// `path`. On any error the destination is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| PdfWorksError::Io(err.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "Output written");
    Ok(())
}

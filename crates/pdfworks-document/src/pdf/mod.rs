// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: reading, rebuilding, merging, splitting, redacting, encrypting,
// and creating PDFs.

pub mod builder;
pub mod merge;
pub mod reader;
pub mod redact;
pub mod security;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{DocumentBuilder, ObjectCopier};
pub use merge::PdfMerger;
pub use reader::PdfReader;
pub use redact::Redactor;
pub use writer::PdfWriter;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the pdfworks tools.

use serde::{Deserialize, Serialize};

/// Process exit statuses reported to the calling process.
///
/// Values follow the BSD `sysexits.h` families, plus `2` for a third-party
/// library that could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    /// A required shared library could not be bound at startup.
    DependencyMissing = 2,
    /// EX_USAGE: wrong arguments or an empty password.
    Usage = 64,
    /// EX_DATAERR: the input was readable but semantically wrong (bad password).
    DataError = 65,
    /// EX_NOINPUT: a referenced input does not exist.
    NoInput = 66,
    /// EX_SOFTWARE: any other failure during processing.
    Software = 70,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One file inside an output ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Entry for a single page, named `page-{number}.{extension}`.
    ///
    /// `number` is 1-based.
    pub fn page(number: usize, extension: &str, bytes: Vec<u8>) -> Self {
        Self::new(format!("page-{number}.{extension}"), bytes)
    }
}

/// Outcome of a redaction run, reported for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RedactionReport {
    /// Pages in the source document.
    pub pages: usize,
    /// Pages whose content stream was rewritten.
    pub rewritten: usize,
    /// Pages copied unchanged because no content bytes could be obtained.
    pub passed_through: usize,
    /// Total literal matches replaced across every page and term.
    pub replacements: usize,
}

impl RedactionReport {
    /// Whether every page's content was inspected.
    pub fn is_complete(&self) -> bool {
        self.passed_through == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_entries_are_one_based() {
        let entry = ArchiveEntry::page(1, "png", vec![1, 2, 3]);
        assert_eq!(entry.name, "page-1.png");
        assert_eq!(ArchiveEntry::page(12, "pdf", Vec::new()).name, "page-12.pdf");
    }

    #[test]
    fn exit_codes_match_sysexits() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::DependencyMissing.code(), 2);
        assert_eq!(ExitStatus::Usage.code(), 64);
        assert_eq!(ExitStatus::DataError.code(), 65);
        assert_eq!(ExitStatus::NoInput.code(), 66);
        assert_eq!(ExitStatus::Software.code(), 70);
    }

    #[test]
    fn report_completeness() {
        let mut report = RedactionReport {
            pages: 3,
            rewritten: 3,
            ..Default::default()
        };
        assert!(report.is_complete());
        report.passed_through = 1;
        assert!(!report.is_complete());
    }
}

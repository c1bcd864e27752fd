// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for pdfworks, and their mapping onto process exit codes.

use thiserror::Error;

use crate::types::ExitStatus;

/// Top-level error type for all pdfworks operations.
#[derive(Debug, Error)]
pub enum PdfWorksError {
    // -- Invocation errors --
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("no images to convert")]
    NoInputs,

    #[error("password required")]
    MissingPassword,

    // -- Data errors --
    #[error("invalid password for PDF")]
    InvalidPassword,

    #[error("PDF has no pages")]
    EmptyDocument,

    // -- Environment --
    #[error("required library unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    // -- Processing errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("page rendering failed: {0}")]
    RenderError(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("archive write failed: {0}")]
    ArchiveError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PdfWorksError {
    /// The process exit status a tool reports for this error.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Usage(_) | Self::MissingPassword => ExitStatus::Usage,
            Self::MissingInput(_) | Self::NoInputs => ExitStatus::NoInput,
            Self::InvalidPassword => ExitStatus::DataError,
            Self::DependencyUnavailable(_) => ExitStatus::DependencyMissing,
            Self::EmptyDocument
            | Self::Config(_)
            | Self::PdfError(_)
            | Self::ImageError(_)
            | Self::RenderError(_)
            | Self::Encryption(_)
            | Self::ArchiveError(_)
            | Self::Io(_) => ExitStatus::Software,
        }
    }

    /// Render the error as a single diagnostic line for the parent process.
    pub fn one_line(&self) -> String {
        collapse_whitespace(&self.to_string())
    }
}

/// Join every run of whitespace (including newlines) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfWorksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_errors_map_to_usage_and_noinput() {
        assert_eq!(
            PdfWorksError::Usage("bad".into()).exit_status().code(),
            64
        );
        assert_eq!(PdfWorksError::MissingPassword.exit_status().code(), 64);
        assert_eq!(
            PdfWorksError::MissingInput("gone".into()).exit_status().code(),
            66
        );
        assert_eq!(PdfWorksError::NoInputs.exit_status().code(), 66);
    }

    #[test]
    fn data_and_dependency_errors() {
        assert_eq!(PdfWorksError::InvalidPassword.exit_status().code(), 65);
        assert_eq!(
            PdfWorksError::DependencyUnavailable("pdfium".into())
                .exit_status()
                .code(),
            2
        );
    }

    #[test]
    fn empty_document_is_a_runtime_failure() {
        assert_eq!(PdfWorksError::EmptyDocument.exit_status().code(), 70);
    }

    #[test]
    fn io_errors_are_runtime_failures() {
        let err: PdfWorksError = std::io::Error::other("disk full").into();
        assert_eq!(err.exit_status(), ExitStatus::Software);
    }

    #[test]
    fn one_line_strips_newlines() {
        let err = PdfWorksError::PdfError("xref\nbroken\r\n  at offset 12".into());
        assert_eq!(err.one_line(), "PDF operation failed: xref broken at offset 12");
        assert!(!err.one_line().contains('\n'));
    }
}

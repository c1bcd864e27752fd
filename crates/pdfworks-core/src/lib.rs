// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfworks: Core types, error taxonomy, and configuration shared by every tool.

pub mod config;
pub mod error;
pub mod types;

pub use config::ToolConfig;
pub use error::PdfWorksError;
pub use types::*;

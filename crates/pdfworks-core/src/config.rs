// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool configuration, read once per invocation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PdfWorksError, Result};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "PDFWORKS_CONFIG";

/// Literal substituted for every redacted match.
pub const DEFAULT_REDACTION_MARKER: &str = "[REDACTED]";

/// Settings shared by every tool. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Scale factor applied when rendering PDF pages to PNG.
    pub render_scale: f32,
    /// Replacement written over each redacted term.
    pub redaction_marker: String,
    /// PDF header version for documents rebuilt page by page.
    pub pdf_version: String,
    /// RC4 key length (bits) used when locking a document.
    pub encryption_key_bits: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            render_scale: 2.0,
            redaction_marker: DEFAULT_REDACTION_MARKER.to_string(),
            pdf_version: "1.5".to_string(),
            encryption_key_bits: 128,
            log_filter: "warn".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load the configuration named by [`CONFIG_ENV`], or the defaults when
    /// the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|err| {
            PdfWorksError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|err| {
            PdfWorksError::Config(format!("invalid {}: {}", path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(PdfWorksError::Config(format!(
                "render_scale must be positive, got {}",
                self.render_scale
            )));
        }
        if self.redaction_marker.is_empty() {
            return Err(PdfWorksError::Config(
                "redaction_marker must not be empty".into(),
            ));
        }
        if !matches!(self.encryption_key_bits, 40..=128) || self.encryption_key_bits % 8 != 0 {
            return Err(PdfWorksError::Config(format!(
                "encryption_key_bits must be a multiple of 8 between 40 and 128, got {}",
                self.encryption_key_bits
            )));
        }
        Ok(())
    }
}

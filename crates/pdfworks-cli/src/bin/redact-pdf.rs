// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// redact-pdf INPUT OUTPUT TERM...: literal replacement in page content.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Replace literal terms in every page's content stream with a marker.
///
/// Matching is byte-for-byte on the drawing operators; text that is split
/// across operators or stored in a font-specific encoding is not removed.
#[derive(Parser)]
// No --help/--version: every argument after OUTPUT is taken verbatim.
#[command(name = "redact-pdf", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Source PDF
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Terms to redact, applied in order
    #[arg(value_name = "TERM", required = true, num_args = 1.., allow_hyphen_values = true)]
    terms: Vec<String>,
}

fn main() -> ExitCode {
    pdfworks_cli::run(|args: Args, config| {
        let report = pipeline::redact_pdf(&args.input, &args.output, &args.terms, config)?;
        tracing::info!(
            pages = report.pages,
            passed_through = report.passed_through,
            replacements = report.replacements,
            "Redaction finished"
        );
        Ok(())
    })
}

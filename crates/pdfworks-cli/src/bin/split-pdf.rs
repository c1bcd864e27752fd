// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// split-pdf INPUT OUTPUT: one single-page PDF per page, inside a ZIP.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Split a PDF into single-page PDFs packed into a ZIP archive.
#[derive(Parser)]
#[command(name = "split-pdf", version)]
struct Args {
    /// Source PDF
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination ZIP
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> ExitCode {
    pdfworks_cli::run(|args: Args, config| {
        let pages = pipeline::split_pdf(&args.input, &args.output, config)?;
        tracing::info!(pages, "Split archive written");
        Ok(())
    })
}

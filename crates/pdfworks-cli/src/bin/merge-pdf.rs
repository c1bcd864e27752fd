// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// merge-pdf OUTPUT INPUT...: concatenate PDFs in argument order.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Merge several PDFs into one, keeping argument order.
#[derive(Parser)]
#[command(name = "merge-pdf", version)]
struct Args {
    /// Destination PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Source PDFs, in order
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    pdfworks_cli::run(|args: Args, config| {
        let pages = pipeline::merge_pdf(&args.output, &args.inputs, config)?;
        tracing::info!(pages, sources = args.inputs.len(), "Merged PDF written");
        Ok(())
    })
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdf-to-images INPUT OUTPUT: every page as PNG inside a ZIP.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Render each page of a PDF to PNG and pack the images into a ZIP archive.
#[derive(Parser)]
#[command(name = "pdf-to-images", version)]
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
        let pages = pipeline::pdf_to_images(&args.input, &args.output, config)?;
        tracing::info!(pages, scale = config.render_scale, "Page images written");
        Ok(())
    })
}

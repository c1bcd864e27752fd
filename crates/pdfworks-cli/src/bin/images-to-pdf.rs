// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// images-to-pdf OUTPUT IMAGE...: one page per image, in argument order.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Combine images into a single PDF, one page per image.
#[derive(Parser)]
#[command(name = "images-to-pdf", version)]
struct Args {
    /// Destination PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Source images, in page order
    #[arg(value_name = "IMAGE", required = true, num_args = 1..)]
    images: Vec<PathBuf>,
}

fn main() -> ExitCode {
    pdfworks_cli::run(|args: Args, _config| {
        let pages = pipeline::images_to_pdf(&args.output, &args.images)?;
        tracing::info!(pages, "Image PDF written");
        Ok(())
    })
}

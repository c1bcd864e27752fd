// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lock-pdf INPUT OUTPUT PASSWORD: encrypt with one user/owner password.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfworks_document::pipeline;

/// Password-protect a PDF.
#[derive(Parser)]
// No --help/--version: every argument after OUTPUT is taken verbatim.
#[command(name = "lock-pdf", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Source PDF
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Password used for both opening and owner access
    #[arg(value_name = "PASSWORD", allow_hyphen_values = true)]
    password: String,
}

fn main() -> ExitCode {
    pdfworks_cli::run(|args: Args, config| pipeline::lock_pdf(&args.input, &args.output, &args.password, config))
}

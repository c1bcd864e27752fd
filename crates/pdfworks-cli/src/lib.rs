// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfworks-cli: Shared harness for the seven pdfworks binaries.
//
// Every binary goes through the same steps: parse positional arguments, load
// the configuration, install logging, run one pipeline, and turn the outcome
// into a process exit code with at most one diagnostic line on stderr.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use pdfworks_core::error::{Result, collapse_whitespace};
use pdfworks_core::{ExitStatus, ToolConfig};
use tracing_subscriber::EnvFilter;

/// Run a tool body with parsed arguments and the loaded configuration.
pub fn run<A, F>(body: F) -> ExitCode
where
    A: Parser,
    F: FnOnce(A, &ToolConfig) -> Result<()>,
{
    ExitCode::from(run_from(std::env::args_os(), body).code())
}

/// Same as [`run`], with an explicit argument list (program name first).
pub fn run_from<A, F, I, T>(args: I, body: F) -> ExitStatus
where
    A: Parser,
    F: FnOnce(A, &ToolConfig) -> Result<()>,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match parse_args::<A, _, _>(args) {
        Ok(args) => args,
        Err(status) => return status,
    };

    let config = match ToolConfig::from_env() {
        Ok(config) => config,
        Err(err) => return report(Err(err)),
    };
    init_logging(&config);

    report(body(args, &config))
}

/// Parse `args` into `A`.
///
/// `--help` and `--version` print to stdout and yield [`ExitStatus::Success`];
/// any other parse failure prints the one-line usage to stderr and yields
/// [`ExitStatus::Usage`].
pub fn parse_args<A, I, T>(args: I) -> std::result::Result<A, ExitStatus>
where
    A: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match A::try_parse_from(args) {
        Ok(args) => Ok(args),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                Err(ExitStatus::Success)
            }
            _ => {
                eprintln!("{}", usage_line::<A>());
                Err(ExitStatus::Usage)
            }
        },
    }
}

/// The command's usage string, collapsed onto one line.
pub fn usage_line<A: Parser>() -> String {
    collapse_whitespace(&A::command().render_usage().to_string())
}

/// Map a pipeline outcome to its exit status, printing the diagnostic line
/// for failures.
pub fn report(result: Result<()>) -> ExitStatus {
    match result {
        Ok(()) => ExitStatus::Success,
        Err(err) => {
            tracing::debug!(error = ?err, "Tool failed");
            eprintln!("{}", err.one_line());
            err.exit_status()
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(config: &ToolConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    // A subscriber may already be installed when several harness runs share
    // a process (tests); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfworks_core::PdfWorksError;
    use std::path::PathBuf;

    /// Copy a file somewhere.
    #[derive(Parser, Debug)]
    #[command(name = "copy-tool", version)]
    struct CopyArgs {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUTS", required = true, num_args = 1..)]
        outputs: Vec<PathBuf>,
    }

    #[test]
    fn positional_arguments_parse() {
        let args = parse_args::<CopyArgs, _, _>(["copy-tool", "a.pdf", "b.pdf", "c.pdf"]).unwrap();
        assert_eq!(args.input, PathBuf::from("a.pdf"));
        assert_eq!(args.outputs.len(), 2);
    }

    #[test]
    fn missing_arguments_are_usage_errors() {
        let status = parse_args::<CopyArgs, _, _>(["copy-tool", "a.pdf"]).unwrap_err();
        assert_eq!(status, ExitStatus::Usage);
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        let status = parse_args::<CopyArgs, _, _>(["copy-tool", "--bogus", "a", "b"]).unwrap_err();
        assert_eq!(status, ExitStatus::Usage);
    }

    #[test]
    fn help_and_version_succeed() {
        assert_eq!(
            parse_args::<CopyArgs, _, _>(["copy-tool", "--help"]).unwrap_err(),
            ExitStatus::Success
        );
        assert_eq!(
            parse_args::<CopyArgs, _, _>(["copy-tool", "--version"]).unwrap_err(),
            ExitStatus::Success
        );
    }

    #[test]
    fn usage_line_is_single_line() {
        let usage = usage_line::<CopyArgs>();
        assert!(usage.starts_with("Usage: copy-tool"));
        assert!(!usage.contains('\n'));
    }

    #[test]
    fn report_maps_errors_to_statuses() {
        assert_eq!(report(Ok(())), ExitStatus::Success);
        assert_eq!(report(Err(PdfWorksError::InvalidPassword)), ExitStatus::DataError);
        assert_eq!(
            report(Err(PdfWorksError::MissingInput("gone".into()))),
            ExitStatus::NoInput
        );
        assert_eq!(report(Err(PdfWorksError::EmptyDocument)), ExitStatus::Software);
    }

    #[test]
    fn body_does_not_run_on_parse_failure() {
        let mut ran = false;
        let status = run_from(["copy-tool"], |_: CopyArgs, _| {
            ran = true;
            Ok(())
        });
        assert_eq!(status, ExitStatus::Usage);
        assert!(!ran);
    }
}

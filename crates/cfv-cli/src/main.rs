//! # cfv-validate entry point
//!
//! Parses arguments, initializes tracing, and maps the validation outcome
//! to the process exit status.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cfv_cli::validate::{run_validate, ValidateArgs};

/// Validate a compliance feature artifact directory before publication.
///
/// Checks index.yml, package.json, .npmrc and, when present, elements.yml.
/// Stops at the first violation.
#[derive(Parser, Debug)]
#[command(name = "cfv-validate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries only the progress lines.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    match run_validate(&cli.args, &mut stdout.lock()) {
        Ok(summary) => {
            tracing::debug!(code = %summary.code, stages = summary.stages.len(), "artifact valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Validation failed\n{e}\n{e:?}");
            ExitCode::from(1)
        }
    }
}

//! Core library for the `housekeep` CLI.
//!
//! Re-derives per-module CMake file lists and umbrella headers from the
//! filesystem, rewriting an artifact only when its content changes.

pub mod adapters;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod generate;
pub mod pathset;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::{HousekeepError, Result, Warning};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_tracing(cli.verbose);
    commands::dispatch(&cli.command)
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // A subscriber may already be installed when `run` is called twice in
    // one process.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .try_init();
}

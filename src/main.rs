//! Binary entrypoint for the `housekeep` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording is handled in commands::dispatch via HOUSEKEEP_RECORD=<file>.
    match housekeep::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Command dispatch and handlers.

pub mod generate;
pub mod module;

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::driver::RunReport;
use crate::error::HousekeepError;
use crate::pathset::normalize;

/// Dispatch a parsed command to its handler.
///
/// When `HOUSEKEEP_RECORD` is set to a file path, every filesystem call is
/// recorded to a cassette at that path.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = match env::var_os("HOUSEKEEP_RECORD") {
        Some(path) => ServiceContext::recording(Path::new(&path)),
        None => ServiceContext::live(),
    };
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Generate { root, flags } => generate::run(ctx, root, &flags.into()),
        Command::Module { dir, flags } => module::run(ctx, dir, &flags.into()),
    }
}

/// Makes a command-line path absolute against the current directory,
/// without resolving symlinks.
fn absolute(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path)
        .map(|p| normalize(&p))
        .map_err(|e| format!("failed to resolve {}: {e}", path.display()))
}

/// Print the written paths and a one-line summary.
fn print_report(report: &RunReport, dry_run: bool) {
    print_written(&report.written, dry_run);
    println!(
        "{} modules, {} files {}, {} warnings",
        report.modules.len(),
        report.written.len(),
        if dry_run { "to write" } else { "written" },
        report.warnings.len(),
    );
}

fn print_written(written: &[PathBuf], dry_run: bool) {
    let verb = if dry_run { "would write" } else { "wrote" };
    for path in written {
        println!("{verb} {}", path.display());
    }
}

/// Renders a run error, first printing whatever the failed run still wrote.
fn report_failure(error: &HousekeepError, dry_run: bool) -> String {
    if let HousekeepError::ModulesFailed { written, .. } = error {
        print_written(written, dry_run);
    }
    error.to_string()
}

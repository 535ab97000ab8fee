//! `housekeep generate` command.

use std::path::Path;

use super::{absolute, print_report, report_failure};
use crate::config::RunOptions;
use crate::context::ServiceContext;
use crate::driver;

/// Execute the `generate` command over the project at `root`.
///
/// # Errors
///
/// Returns an error string if the root cannot be resolved or the run fails.
pub fn run(ctx: &ServiceContext, root: &Path, options: &RunOptions) -> Result<(), String> {
    let root = absolute(root)?;
    if !ctx.fs.is_dir(&root) {
        return Err(format!("{} is not a directory", root.display()));
    }
    let report = driver::run(ctx, &root, options)
        .map_err(|e| report_failure(&e, options.dry_run))?;
    print_report(&report, options.dry_run);
    Ok(())
}

//! `housekeep module` command.

use std::path::Path;

use super::{absolute, print_report, report_failure};
use crate::config::RunOptions;
use crate::context::ServiceContext;
use crate::driver;

/// Execute the `module` command for the single module at `dir`.
///
/// # Errors
///
/// Returns an error string if the directory cannot be resolved or generation fails.
pub fn run(ctx: &ServiceContext, dir: &Path, options: &RunOptions) -> Result<(), String> {
    let dir = absolute(dir)?;
    if !ctx.fs.is_dir(&dir) {
        return Err(format!("{} is not a directory", dir.display()));
    }
    let report = driver::run_module(ctx, &dir, options)
        .map_err(|e| report_failure(&e, options.dry_run))?;
    print_report(&report, options.dry_run);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.cpp"), "").unwrap();

        let ctx = ServiceContext::live();
        let options = RunOptions { dry_run: true, ..RunOptions::default() };
        run(&ctx, dir.path(), &options).unwrap();
        assert!(!dir.path().join("sources.cmake").exists());
    }
}

//! Umbrella header: `include/<module>/<module>.h` re-exporting every public header.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::writer::{ArtifactWriter, WriteOutcome};
use crate::classify::{classify_role, FileRole};
use crate::config::ModuleConfig;
use crate::context::ServiceContext;
use crate::error::{HousekeepError, Result, Warning};
use crate::pathset::{self, relative_slash_path};

/// First line of every generated umbrella header.
///
/// An existing header that does not start with this line is treated as
/// hand-written and left alone unless `umbrella_header.force` is set.
pub const BANNER: &str = "// Generated by housekeep. Do not edit; changes will be overwritten.\n";

/// Result of an umbrella header pass for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UmbrellaOutcome {
    /// `umbrella_header.generate` is off.
    Disabled,
    /// A hand-written header is in the way; nothing was written.
    Skipped(Warning),
    /// The header was generated (possibly unchanged).
    Generated(WriteOutcome),
}

/// Location of the umbrella header for a module.
#[must_use]
pub fn target_path(module_dir: &Path, module_name: &str) -> PathBuf {
    module_dir.join("include").join(module_name).join(format!("{module_name}.h"))
}

/// Renders the header text for `headers`, skipping `target` itself and any
/// path outside the module's `include/` directory.
#[must_use]
pub fn render(module_dir: &Path, target: &Path, headers: &[PathBuf]) -> String {
    let include_dir = module_dir.join("include");
    let mut out = String::from(BANNER);
    out.push_str("#pragma once\n\n");
    for header in headers {
        if header == target || classify_role(header, module_dir) != FileRole::Include {
            continue;
        }
        if let Some(relative) = relative_slash_path(header, &include_dir) {
            let _ = writeln!(out, "#include \"{relative}\"");
        }
    }
    out
}

/// Generates the umbrella header for the module at `module_dir`.
///
/// Headers are resolved from `config.umbrella_header` relative to the
/// module's `include/` directory, independently of the manifest file set.
///
/// # Errors
///
/// Returns an error if header patterns are invalid or a filesystem call
/// fails.
pub fn generate(
    ctx: &ServiceContext,
    writer: &mut ArtifactWriter<'_>,
    module_dir: &Path,
    module_name: &str,
    config: &ModuleConfig,
) -> Result<UmbrellaOutcome> {
    let settings = &config.umbrella_header;
    if !settings.generate {
        return Ok(UmbrellaOutcome::Disabled);
    }

    let target = target_path(module_dir, module_name);
    if !settings.force && ctx.fs.exists(&target) {
        let existing = ctx.fs.read(&target).map_err(|e| HousekeepError::io(&target, e))?;
        if !existing.starts_with(BANNER.as_bytes()) {
            let warning = Warning::UmbrellaHeaderClobber { path: target };
            tracing::warn!("{warning}");
            return Ok(UmbrellaOutcome::Skipped(warning));
        }
    }

    let include_dir = module_dir.join("include");
    let headers =
        pathset::resolve(ctx, &settings.include, &settings.exclude, &include_dir, true)?;
    let outcome = writer.write(&target, &render(module_dir, &target, &headers))?;
    Ok(UmbrellaOutcome::Generated(outcome))
}

//! Artifact generation for a single module.

pub mod manifest;
pub mod umbrella;
pub mod writer;

use std::path::Path;

use crate::config::loader::{self, Resolved};
use crate::config::{ModuleConfig, RunOptions, MODULE_CONFIG_FILE};
use crate::context::ServiceContext;
use crate::error::{Result, Warning};
use crate::pathset;
use self::umbrella::UmbrellaOutcome;
use self::writer::ArtifactWriter;

/// Resolves the module's config, then writes its umbrella header and
/// manifest. Returns the warnings raised along the way.
///
/// The umbrella header is produced before the module's files are resolved
/// so that a freshly generated header is listed in the same run's manifest.
/// `module_dir` is normalized first; every listed path is relative to it.
///
/// # Errors
///
/// Returns an error if the module's config is invalid, a pattern is
/// invalid, or a filesystem call fails.
pub fn generate_module(
    ctx: &ServiceContext,
    writer: &mut ArtifactWriter<'_>,
    module_dir: &Path,
    options: &RunOptions,
) -> Result<Vec<Warning>> {
    let module_dir = &pathset::normalize(module_dir);
    let name = module_name(module_dir);
    let Resolved { config, mut warnings } =
        loader::resolve::<ModuleConfig>(ctx, &module_dir.join(MODULE_CONFIG_FILE), options.strict)?;

    if let UmbrellaOutcome::Skipped(warning) =
        umbrella::generate(ctx, writer, module_dir, &name, &config)?
    {
        warnings.push(warning);
    }

    let files = pathset::resolve(ctx, &config.include, &config.exclude, module_dir, true)?;
    tracing::debug!(module = %name, files = files.len(), "resolved module files");
    manifest::generate(writer, module_dir, &files, &options.manifest_name)?;
    Ok(warnings)
}

/// Base name of a module directory.
#[must_use]
pub fn module_name(module_dir: &Path) -> String {
    module_dir.file_name().map_or_else(
        || module_dir.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    )
}

//! Per-module source manifest (`sources.cmake`).

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::writer::{ArtifactWriter, WriteOutcome};
use crate::classify::{FileRecord, FileRole};
use crate::error::Result;
use crate::pathset::relative_slash_path;

/// Renders one `list(APPEND ...)` line per classified file, in input order.
///
/// Files with no type or no role are skipped. Test files go to
/// `TEST_<TYPE>_LIST`, everything else to `<TYPE>_LIST`.
#[must_use]
pub fn render(module_dir: &Path, files: &[PathBuf]) -> String {
    let mut out = String::new();
    for path in files {
        let record = FileRecord::new(path, module_dir);
        let Some(stem) = record.file_type.list_stem() else {
            continue;
        };
        if record.role == FileRole::None {
            continue;
        }
        let Some(relative) = relative_slash_path(path, module_dir) else {
            continue;
        };
        let prefix = if record.role == FileRole::Test { "TEST_" } else { "" };
        tracing::debug!(file = %relative, role = %record.role, "listed");
        let _ = writeln!(out, "list(APPEND {prefix}{stem}_LIST \"{relative}\")");
    }
    out
}

/// Writes the manifest for `module_dir` as `manifest_name` inside it.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or written.
pub fn generate(
    writer: &mut ArtifactWriter<'_>,
    module_dir: &Path,
    files: &[PathBuf],
    manifest_name: &str,
) -> Result<WriteOutcome> {
    writer.write(&module_dir.join(manifest_name), &render(module_dir, files))
}

//! Include/exclude pattern sets resolved to sorted absolute paths.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{HousekeepError, Result};

/// Resolves `includes` minus `excludes` against `base`.
///
/// Relative patterns are joined onto `base`, every pattern is normalized
/// lexically, and the union of include matches minus the union of exclude
/// matches is returned deduplicated and in bytewise path order. Patterns
/// that match nothing are not an error. With `recursive` unset, `**` behaves
/// like `*`.
///
/// # Errors
///
/// Returns [`HousekeepError::Pattern`] for a pattern the glob engine rejects
/// and [`HousekeepError::Io`] if expansion fails on disk.
pub fn resolve(
    ctx: &ServiceContext,
    includes: &[String],
    excludes: &[String],
    base: &Path,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in includes {
        paths.extend(expand(ctx, base, pattern, recursive)?);
    }

    let mut excluded = HashSet::new();
    for pattern in excludes {
        excluded.extend(expand(ctx, base, pattern, recursive)?);
    }

    paths.retain(|p| !excluded.contains(p));
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup();
    Ok(paths)
}

fn expand(ctx: &ServiceContext, base: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let pattern = to_glob_pattern(base, pattern, recursive);
    glob::Pattern::new(&pattern).map_err(|e| HousekeepError::Pattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;
    let matches = ctx.fs.glob(&pattern).map_err(|e| HousekeepError::io(base, e))?;
    tracing::debug!(%pattern, count = matches.len(), "expanded pattern");
    Ok(matches)
}

/// Builds the absolute glob pattern handed to the filesystem port.
///
/// The part of the result that comes from `base` is escaped so that glob
/// metacharacters in directory names match literally.
fn to_glob_pattern(base: &Path, pattern: &str, recursive: bool) -> String {
    let pattern = if recursive { pattern.to_string() } else { pattern.replace("**", "*") };
    let raw = Path::new(&pattern);
    if raw.is_absolute() {
        return normalize(raw).to_string_lossy().into_owned();
    }

    let base = normalize(base);
    let joined = normalize(&base.join(raw));
    match joined.strip_prefix(&base) {
        Ok(rest) => {
            let escaped = PathBuf::from(glob::Pattern::escape(&base.to_string_lossy()));
            if rest.as_os_str().is_empty() {
                escaped.to_string_lossy().into_owned()
            } else {
                escaped.join(rest).to_string_lossy().into_owned()
            }
        }
        // `..` walked out of the base directory.
        Err(_) => joined.to_string_lossy().into_owned(),
    }
}

/// Lexically normalizes a path: drops `.` and resolves `..` against the
/// preceding component. Symlinks are not consulted.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component.as_os_str()),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Renders `path` relative to `base` with `/` separators on every platform.
///
/// Returns `None` if `path` is not under `base`.
#[must_use]
pub fn relative_slash_path(path: &Path, base: &Path) -> Option<String> {
    let rest = path.strip_prefix(base).ok()?;
    let parts: Vec<String> =
        rest.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    Some(parts.join("/"))
}

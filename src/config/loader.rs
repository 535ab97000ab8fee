//! Loading config documents and resolving them over typed defaults.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::merge::merge;
use crate::context::ServiceContext;
use crate::error::{HousekeepError, Result, Warning};

/// A config resolved over its defaults, plus anything worth warning about.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The effective configuration.
    pub config: T,
    /// Unknown keys that were ignored.
    pub warnings: Vec<Warning>,
}

/// Loads a config document, returning an empty object if the file is absent.
///
/// # Errors
///
/// Returns [`HousekeepError::ConfigParse`] with line and column if the file
/// exists but is not valid JSON, or [`HousekeepError::Io`] if it cannot be
/// read.
pub fn load(ctx: &ServiceContext, path: &Path) -> Result<Value> {
    if !ctx.fs.exists(path) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let text = ctx.fs.read_to_string(path).map_err(|e| HousekeepError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| HousekeepError::parse(path, &e))
}

/// Loads the document at `path` and merges it over `T::default()`.
///
/// Unknown keys are logged and returned as warnings, or rejected when
/// `strict` is set.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed, if a value
/// has the wrong type for its slot, or (in strict mode) if it contains a
/// key the default does not have.
pub fn resolve<T>(ctx: &ServiceContext, path: &Path, strict: bool) -> Result<Resolved<T>>
where
    T: Default + Serialize + DeserializeOwned,
{
    let default = serde_json::to_value(T::default())
        .map_err(|e| HousekeepError::shape(path, e.to_string()))?;
    let loaded = load(ctx, path)?;

    let merged = merge(&default, &loaded).map_err(|m| {
        let message = if m.key.is_empty() {
            format!("expected an object at the top level, found {}", m.found)
        } else {
            format!("`{}` must be an object, found {}", m.key, m.found)
        };
        HousekeepError::shape(path, message)
    })?;

    let mut warnings = Vec::new();
    for key in merged.unknown_keys {
        if strict {
            return Err(HousekeepError::UnknownConfigKey { path: path.to_path_buf(), key });
        }
        let warning = Warning::UnknownConfigKey { path: path.to_path_buf(), key };
        tracing::warn!("{warning}");
        warnings.push(warning);
    }

    let config =
        serde_json::from_value(merged.value).map_err(|e| HousekeepError::shape(path, e.to_string()))?;
    Ok(Resolved { config, warnings })
}

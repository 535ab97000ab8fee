//! Recursive merge of a loaded config document over its default shape.
//!
//! For each key in the loaded document:
//! - a key the default does not have is reported and skipped;
//! - a key whose default is an object is merged recursively;
//! - anything else (scalar, string, array) replaces the default wholesale.
//!
//! Keys the loaded document does not mention keep their default value.

use serde_json::{Map, Value};

/// Result of merging a loaded document over a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The merged document, same shape as the default.
    pub value: Value,
    /// Dotted paths of loaded keys that have no counterpart in the default.
    pub unknown_keys: Vec<String>,
}

/// A loaded value that cannot be merged into an object slot of the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Dotted path of the offending key; empty for the document root.
    pub key: String,
    /// JSON type name of the value found there.
    pub found: &'static str,
}

/// Merges `loaded` over `default`.
///
/// # Errors
///
/// Returns [`ShapeMismatch`] when `loaded` holds a non-object where the
/// default has an object (including at the document root).
pub fn merge(default: &Value, loaded: &Value) -> Result<Merged, ShapeMismatch> {
    let mut value = default.clone();
    let mut unknown_keys = Vec::new();
    match (&mut value, loaded) {
        (Value::Object(target), Value::Object(source)) => {
            merge_objects(target, source, "", &mut unknown_keys)?;
        }
        (Value::Object(_), other) => {
            return Err(ShapeMismatch { key: String::new(), found: type_name(other) });
        }
        (slot, other) => *slot = other.clone(),
    }
    Ok(Merged { value, unknown_keys })
}

fn merge_objects(
    target: &mut Map<String, Value>,
    source: &Map<String, Value>,
    prefix: &str,
    unknown_keys: &mut Vec<String>,
) -> Result<(), ShapeMismatch> {
    for (key, loaded) in source {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        let Some(slot) = target.get_mut(key) else {
            unknown_keys.push(path);
            continue;
        };
        match (slot, loaded) {
            (Value::Object(nested), Value::Object(loaded)) => {
                merge_objects(nested, loaded, &path, unknown_keys)?;
            }
            (Value::Object(_), other) => {
                return Err(ShapeMismatch { key: path, found: type_name(other) });
            }
            (slot, other) => *slot = other.clone(),
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

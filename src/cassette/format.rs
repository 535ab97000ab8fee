//! On-disk cassette model: a YAML list of filesystem calls and their results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port name under which filesystem calls are recorded.
pub const FS_PORT: &str = "fs";

/// One recorded call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, starting at 0.
    pub seq: u64,
    /// Always [`FS_PORT`] for cassettes written by this tool.
    pub port: String,
    /// `FileSystem` method name, e.g. `glob` or `write`.
    pub method: String,
    /// Call arguments, e.g. `{"path": ...}` or `{"pattern": ...}`.
    pub input: serde_json::Value,
    /// Bare value for infallible methods, `{"ok": ..}` / `{"err": ..}` otherwise.
    pub output: serde_json::Value,
}

/// A recorded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Session name given to the recorder.
    pub name: String,
    /// When recording started.
    pub recorded_at: DateTime<Utc>,
    /// Revision of the recorded project, or `unknown`.
    pub commit: String,
    /// Calls in the order they were made.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cassette.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Recorded filesystem calls, skipping anything recorded for another port.
    pub fn fs_calls(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(|i| i.port == FS_PORT)
    }
}

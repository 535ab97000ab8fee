//! Typed configuration with structural defaults.
//!
//! Config documents are optional JSON files. Whatever a document contains
//! is merged over the serialized default (see [`merge`]) and the result is
//! deserialized back into these types, so every field always has a value.

pub mod loader;
pub mod merge;

use serde::{Deserialize, Serialize};

/// Name of the per-module config document.
pub const MODULE_CONFIG_FILE: &str = "housekeep.json";

/// Name of the project-level config document.
pub const TOP_LEVEL_CONFIG_FILE: &str = "housekeep-modules.json";

/// Default name of the per-module manifest.
pub const MODULE_MANIFEST_FILE: &str = "sources.cmake";

/// Name of the project-level module index.
pub const MODULE_INDEX_FILE: &str = "modules.cmake";

/// Per-module configuration, read from `housekeep.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Patterns (relative to the module directory) feeding the manifest.
    pub include: Vec<String>,
    /// Patterns removed from the include matches.
    pub exclude: Vec<String>,
    /// Umbrella header settings.
    pub umbrella_header: UmbrellaConfig,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            include: vec!["src/**/*".into(), "include/**/*".into(), "test/**/*".into()],
            exclude: Vec::new(),
            umbrella_header: UmbrellaConfig::default(),
        }
    }
}

/// Umbrella header settings for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmbrellaConfig {
    /// Whether to generate `include/<module>/<module>.h` at all.
    pub generate: bool,
    /// Header patterns, relative to the module's `include/` directory.
    pub include: Vec<String>,
    /// Patterns removed from the header matches.
    pub exclude: Vec<String>,
    /// Overwrite an existing header even if it lacks the generated banner.
    pub force: bool,
}

impl Default for UmbrellaConfig {
    fn default() -> Self {
        Self {
            generate: false,
            include: vec!["**/*.h".into(), "**/*.hpp".into()],
            exclude: Vec::new(),
            force: false,
        }
    }
}

/// Project-level configuration, read from `housekeep-modules.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelConfig {
    /// Patterns (relative to the project root) selecting module directories.
    pub include: Vec<String>,
    /// Patterns removed from the include matches.
    pub exclude: Vec<String>,
}

impl Default for TopLevelConfig {
    fn default() -> Self {
        Self { include: vec!["*".into()], exclude: Vec::new() }
    }
}

/// Switches that apply to a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Treat unknown config keys as errors instead of warnings.
    pub strict: bool,
    /// Report the files that would change without writing them.
    pub dry_run: bool,
    /// File name of the per-module manifest.
    pub manifest_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { strict: false, dry_run: false, manifest_name: MODULE_MANIFEST_FILE.to_string() }
    }
}

//! Error and warning types shared by every stage of a run.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HousekeepError>;

/// Errors that stop a module pass or the whole run.
#[derive(Debug, Error)]
pub enum HousekeepError {
    /// A config document exists but is not valid JSON.
    #[error("failed to parse {path} at line {line}, column {column}: {message}")]
    ConfigParse {
        /// Config file that failed to parse.
        path: PathBuf,
        /// 1-based line of the parse failure.
        line: usize,
        /// 1-based column of the parse failure.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// A config document parsed but does not fit the config shape.
    #[error("invalid config {path}: {message}")]
    ConfigShape {
        /// Config file with the bad value.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },

    /// Strict mode only: a key with no counterpart in the default config.
    #[error("unknown key `{key}` in {path}")]
    UnknownConfigKey {
        /// Config file containing the key.
        path: PathBuf,
        /// Dotted key path.
        key: String,
    },

    /// A glob pattern could not be compiled.
    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern {
        /// The pattern as handed to the glob engine.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A filesystem call failed.
    #[error("I/O error at {path}: {message}")]
    Io {
        /// Path the failing call was made on.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },

    /// One or more modules could not be processed.
    #[error("{count} module(s) failed; first failure: {first}")]
    ModulesFailed {
        /// Number of failed modules.
        count: usize,
        /// The first failure encountered.
        first: Box<HousekeepError>,
        /// Files written (or due to be written in a dry run) for the other
        /// modules and the index.
        written: Vec<PathBuf>,
    },
}

impl HousekeepError {
    /// Wrap a port error with the path it was raised for.
    pub fn io(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self::Io { path: path.into(), message: error.to_string() }
    }

    /// Build a shape error for the given config file.
    pub fn shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigShape { path: path.into(), message: message.into() }
    }

    /// Whether the error only concerns one module's own config or patterns,
    /// so sibling modules can still be processed.
    #[must_use]
    pub fn is_module_local(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. }
                | Self::ConfigShape { .. }
                | Self::UnknownConfigKey { .. }
                | Self::Pattern { .. }
        )
    }

    /// Convert a `serde_json` parse failure into a positioned parse error.
    #[must_use]
    pub fn parse(path: &Path, error: &serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.to_path_buf(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

/// Non-fatal conditions reported during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A config key with no counterpart in the default shape was ignored.
    UnknownConfigKey {
        /// Config file containing the key.
        path: PathBuf,
        /// Dotted key path.
        key: String,
    },
    /// An umbrella header exists that was not written by this tool.
    UmbrellaHeaderClobber {
        /// The hand-authored header that was left untouched.
        path: PathBuf,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownConfigKey { path, key } => {
                write!(f, "ignoring unknown key `{key}` in {}", path.display())
            }
            Self::UmbrellaHeaderClobber { path } => write!(
                f,
                "{} was not generated by housekeep; set umbrella_header.force to overwrite it",
                path.display()
            ),
        }
    }
}

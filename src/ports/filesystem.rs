//! Filesystem port for file I/O and glob expansion.

use std::path::{Path, PathBuf};

/// Error type returned by port methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Provides filesystem access for reading, writing and matching files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Reads the raw bytes of a file, whatever its encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError>;

    /// Replaces the contents of a file, creating parent directories as needed.
    ///
    /// Readers never observe a partially written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Expands an absolute glob pattern.
    ///
    /// `**` as a whole path component matches any depth. Entries whose name
    /// starts with `.` only match a pattern component that starts with `.`.
    /// Matches are returned in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or a directory visited
    /// during expansion cannot be read.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, PortError>;
}

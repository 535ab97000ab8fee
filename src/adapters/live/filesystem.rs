//! Live filesystem adapter using `std::fs`, `glob` and `atomicwrites`.

use std::io::Write;
use std::path::{Path, PathBuf};

use atomicwrites::{AllowOverwrite, AtomicFile};
use glob::MatchOptions;

use crate::ports::filesystem::{FileSystem, PortError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        Ok(std::fs::read(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        AtomicFile::new(path, AllowOverwrite)
            .write(|f| f.write_all(contents.as_bytes()))
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, PortError> {
        let mut matches = Vec::new();
        for entry in glob::glob_with(pattern, MATCH_OPTIONS)? {
            matches.push(entry?);
        }
        Ok(matches)
    }
}

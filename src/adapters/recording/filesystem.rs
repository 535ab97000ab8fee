//! Recording adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::format::FS_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::filesystem::PortError;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a str,
    contents: &'a str,
}

#[derive(Serialize)]
struct PatternInput<'a> {
    pattern: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, FS_PORT, "read_to_string", &input, &result);
        result
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        let result = self.inner.read(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, FS_PORT, "read", &input, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: &path.display().to_string(), contents };
        record_result(&self.recorder, FS_PORT, "write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let input = PathInput { path: &path.display().to_string() };
        record_interaction(&self.recorder, FS_PORT, "exists", &input, &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        let input = PathInput { path: &path.display().to_string() };
        record_interaction(&self.recorder, FS_PORT, "is_dir", &input, &result);
        result
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, PortError> {
        let result = self.inner.glob(pattern);
        let input = PatternInput { pattern };
        record_result(&self.recorder, FS_PORT, "glob", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_glob_and_write_interactions() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("fs.cassette.yaml");
        let target = dir.path().join("out.cmake");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            fs.write(&target, "list(APPEND MODULE_LIST \"core\")\n").unwrap();
            let base = glob::Pattern::escape(&dir.path().display().to_string());
            let pattern = format!("{base}/*.cmake");
            let found = fs.glob(&pattern).unwrap();
            assert_eq!(found, vec![target.clone()]);
            assert!(!fs.is_dir(&target));
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
        assert_eq!(methods, vec!["write", "glob", "is_dir"]);
        assert_eq!(
            cassette.interactions[1].output,
            serde_json::json!({ "ok": [target.display().to_string()] })
        );
    }
}

//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for file I/O and glob expansion.
    pub fs: Box<dyn FileSystem>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem), recorder: None }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work. This is the developer-only
    /// mechanism for capturing cassettes via the `HOUSEKEEP_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "housekeep-session", "unknown")));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            recorder: None,
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let guard = match recorder.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match guard.save() {
                Ok(()) => tracing::info!(path = %guard.path().display(), "cassette written"),
                Err(e) => tracing::warn!("failed to write cassette: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replaying_context_from_cassette_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "fs".into(),
                method: "exists".into(),
                input: json!({"path": "/proj/housekeep-modules.json"}),
                output: json!(false),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert!(!ctx.fs.exists(Path::new("/proj/housekeep-modules.json")));
    }

    #[test]
    fn replaying_reports_missing_cassette() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/run.cassette.yaml"))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("rec.cassette.yaml");

        {
            let ctx = ServiceContext::recording(&cassette_path);
            assert!(ctx.fs.is_dir(dir.path()));
        }

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].method, "is_dir");
        assert_eq!(cassette.interactions[0].output, json!(true));
    }
}

//! Content-comparing writer for generated artifacts.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{HousekeepError, Result};

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file already held exactly this content; nothing was touched.
    Unchanged,
    /// The file was absent or different and has been replaced.
    Written,
    /// Dry run: the file would have been replaced.
    WouldWrite,
}

/// Writes generated text only when it differs from what is on disk.
///
/// Leaving identical files alone keeps their modification times stable, so
/// the build system does not reconfigure after a no-op run.
pub struct ArtifactWriter<'a> {
    ctx: &'a ServiceContext,
    dry_run: bool,
    written: Vec<PathBuf>,
}

impl<'a> ArtifactWriter<'a> {
    /// Creates a writer over the context's filesystem.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, dry_run: bool) -> Self {
        Self { ctx, dry_run, written: Vec::new() }
    }

    /// Replaces `path` with `content` unless it already matches.
    ///
    /// # Errors
    ///
    /// Returns [`HousekeepError::Io`] if the existing file cannot be read or
    /// the new content cannot be written.
    pub fn write(&mut self, path: &Path, content: &str) -> Result<WriteOutcome> {
        if self.ctx.fs.exists(path) {
            let existing = self.ctx.fs.read(path).map_err(|e| HousekeepError::io(path, e))?;
            if existing == content.as_bytes() {
                tracing::debug!(path = %path.display(), "unchanged");
                return Ok(WriteOutcome::Unchanged);
            }
        }

        if self.dry_run {
            tracing::info!(path = %path.display(), "would write");
            self.written.push(path.to_path_buf());
            return Ok(WriteOutcome::WouldWrite);
        }
        self.ctx.fs.write(path, content).map_err(|e| HousekeepError::io(path, e))?;
        tracing::info!(path = %path.display(), "wrote");
        self.written.push(path.to_path_buf());
        Ok(WriteOutcome::Written)
    }

    /// Paths written (or, in a dry run, due to be written) so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Consumes the writer, returning the written paths.
    #[must_use]
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": "/proj/core/sources.cmake"}),
            output,
        }
    }

    fn replaying(interactions: Vec<Interaction>) -> ServiceContext {
        ServiceContext::from_cassette(&Cassette {
            name: "writer".into(),
            recorded_at: Utc::now(),
            commit: "unknown".into(),
            interactions,
        })
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        // No `write` interaction is recorded: calling it would panic.
        let ctx = replaying(vec![
            interaction(0, "exists", json!(true)),
            interaction(
                1,
                "read",
                json!({"ok": b"list(APPEND SOURCE_LIST \"src/a.cpp\")\n".as_slice()}),
            ),
        ]);
        let mut writer = ArtifactWriter::new(&ctx, false);
        let outcome = writer
            .write(
                Path::new("/proj/core/sources.cmake"),
                "list(APPEND SOURCE_LIST \"src/a.cpp\")\n",
            )
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Unchanged);
        assert!(writer.written().is_empty());
    }

    #[test]
    fn absent_file_is_written() {
        let ctx = replaying(vec![
            interaction(0, "exists", json!(false)),
            interaction(1, "write", json!({"ok": null})),
        ]);
        let mut writer = ArtifactWriter::new(&ctx, false);
        let path = Path::new("/proj/core/sources.cmake");
        assert_eq!(writer.write(path, "").unwrap(), WriteOutcome::Written);
        assert_eq!(writer.into_written(), vec![path.to_path_buf()]);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let ctx = replaying(vec![
            interaction(0, "exists", json!(true)),
            interaction(1, "read", json!({"ok": b"stale\n".as_slice()})),
        ]);
        let mut writer = ArtifactWriter::new(&ctx, true);
        let outcome = writer.write(Path::new("/proj/core/sources.cmake"), "fresh\n").unwrap();
        assert_eq!(outcome, WriteOutcome::WouldWrite);
        assert_eq!(writer.written().len(), 1);
    }

    #[test]
    fn failed_write_names_the_path() {
        let ctx = replaying(vec![
            interaction(0, "exists", json!(false)),
            interaction(1, "write", json!({"err": "permission denied"})),
        ]);
        let mut writer = ArtifactWriter::new(&ctx, false);
        let err = writer.write(Path::new("/proj/core/sources.cmake"), "x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "I/O error at /proj/core/sources.cmake: permission denied"
        );
    }

    #[test]
    fn stale_file_in_another_encoding_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.cmake");
        std::fs::write(&path, b"# \xc0\xac\n").unwrap();
        let ctx = ServiceContext::live();
        let mut writer = ArtifactWriter::new(&ctx, false);

        assert_eq!(writer.write(&path, "fresh\n").unwrap(), WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn second_live_write_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modules.cmake");
        let ctx = ServiceContext::live();
        let mut writer = ArtifactWriter::new(&ctx, false);

        assert_eq!(writer.write(&path, "a\n").unwrap(), WriteOutcome::Written);
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(writer.write(&path, "a\n").unwrap(), WriteOutcome::Unchanged);
        let after = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }
}

//! Project-wide pass: discover modules, generate their artifacts, write the index.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::loader::{self, Resolved};
use crate::config::{RunOptions, TopLevelConfig, MODULE_INDEX_FILE, TOP_LEVEL_CONFIG_FILE};
use crate::context::ServiceContext;
use crate::error::{HousekeepError, Result, Warning};
use crate::generate::writer::ArtifactWriter;
use crate::generate::{generate_module, module_name};
use crate::pathset;

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Module names in index order.
    pub modules: Vec<String>,
    /// Files written, or due to be written in a dry run.
    pub written: Vec<PathBuf>,
    /// Non-fatal conditions encountered.
    pub warnings: Vec<Warning>,
}

/// Runs every module under `root` and writes `root/modules.cmake`.
///
/// A module whose config or patterns are invalid is logged and skipped; the
/// remaining modules and the index are still generated, and the run then
/// fails with [`HousekeepError::ModulesFailed`], which still carries the
/// written paths. Filesystem failures abort immediately.
///
/// # Errors
///
/// Returns an error if the top-level config is invalid, any module failed,
/// or a filesystem call fails.
pub fn run(ctx: &ServiceContext, root: &Path, options: &RunOptions) -> Result<RunReport> {
    let Resolved { config, mut warnings } = loader::resolve::<TopLevelConfig>(
        ctx,
        &root.join(TOP_LEVEL_CONFIG_FILE),
        options.strict,
    )?;
    let candidates = pathset::resolve(ctx, &config.include, &config.exclude, root, false)?;

    let mut writer = ArtifactWriter::new(ctx, options.dry_run);
    let mut modules = Vec::new();
    let mut index = String::new();
    let mut failures = Vec::new();

    for dir in candidates {
        if !ctx.fs.is_dir(&dir) {
            continue;
        }
        let name = module_name(&dir);
        let _ = writeln!(index, "list(APPEND MODULE_LIST \"{name}\")");

        let span = tracing::info_span!("module", name = %name);
        let _enter = span.enter();
        match generate_module(ctx, &mut writer, &dir, options) {
            Ok(module_warnings) => warnings.extend(module_warnings),
            Err(e) if e.is_module_local() => {
                tracing::error!("{e}");
                failures.push(e);
            }
            Err(e) => return Err(e),
        }
        modules.push(name);
    }

    writer.write(&root.join(MODULE_INDEX_FILE), &index)?;

    if !failures.is_empty() {
        let count = failures.len();
        let first = failures.swap_remove(0);
        let written = writer.into_written();
        tracing::warn!(count, files = written.len(), "run finished with failed modules");
        return Err(HousekeepError::ModulesFailed { count, first: Box::new(first), written });
    }

    Ok(RunReport { modules, written: writer.into_written(), warnings })
}

/// Generates one module's artifacts without touching any module index.
///
/// # Errors
///
/// Returns an error if the module's config or patterns are invalid or a
/// filesystem call fails.
pub fn run_module(
    ctx: &ServiceContext,
    module_dir: &Path,
    options: &RunOptions,
) -> Result<RunReport> {
    let module_dir = &pathset::normalize(module_dir);
    let mut writer = ArtifactWriter::new(ctx, options.dry_run);
    let warnings = generate_module(ctx, &mut writer, module_dir, options)?;
    Ok(RunReport {
        modules: vec![module_name(module_dir)],
        written: writer.into_written(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn fs_call(
        seq: u64,
        method: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Interaction {
        Interaction { seq, port: "fs".into(), method: method.into(), input, output }
    }

    /// A project with one non-directory entry and one module with no
    /// recognized subfolders.
    fn bare_project() -> Cassette {
        Cassette {
            name: "driver-bare-module".into(),
            recorded_at: Utc::now(),
            commit: "unknown".into(),
            interactions: vec![
                fs_call(0, "exists", json!({"path": "/proj/housekeep-modules.json"}), json!(false)),
                fs_call(
                    1,
                    "glob",
                    json!({"pattern": "/proj/*"}),
                    json!({"ok": ["/proj/README.md", "/proj/docs"]}),
                ),
                fs_call(2, "is_dir", json!({"path": "/proj/README.md"}), json!(false)),
                fs_call(3, "is_dir", json!({"path": "/proj/docs"}), json!(true)),
                fs_call(4, "exists", json!({"path": "/proj/docs/housekeep.json"}), json!(false)),
                fs_call(5, "glob", json!({"pattern": "/proj/docs/src/**/*"}), json!({"ok": []})),
                fs_call(6, "glob", json!({"pattern": "/proj/docs/include/**/*"}), json!({"ok": []})),
                fs_call(7, "glob", json!({"pattern": "/proj/docs/test/**/*"}), json!({"ok": []})),
                fs_call(8, "exists", json!({"path": "/proj/docs/sources.cmake"}), json!(false)),
                fs_call(
                    9,
                    "write",
                    json!({"path": "/proj/docs/sources.cmake", "contents": ""}),
                    json!({"ok": null}),
                ),
                fs_call(10, "exists", json!({"path": "/proj/modules.cmake"}), json!(false)),
                fs_call(
                    11,
                    "write",
                    json!({
                        "path": "/proj/modules.cmake",
                        "contents": "list(APPEND MODULE_LIST \"docs\")\n"
                    }),
                    json!({"ok": null}),
                ),
            ],
        }
    }

    #[test]
    fn module_without_subfolders_is_still_indexed() {
        let ctx = ServiceContext::from_cassette(&bare_project());
        let report = run(&ctx, Path::new("/proj"), &RunOptions::default()).unwrap();
        assert_eq!(report.modules, vec!["docs"]);
        assert_eq!(
            report.written,
            vec![PathBuf::from("/proj/docs/sources.cmake"), PathBuf::from("/proj/modules.cmake")]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn broken_module_config_does_not_stop_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("alpha/src")).unwrap();
        std::fs::write(root.join("alpha/housekeep.json"), "{ not json").unwrap();
        std::fs::create_dir_all(root.join("beta/src")).unwrap();
        std::fs::write(root.join("beta/src/b.cpp"), "").unwrap();

        let ctx = ServiceContext::live();
        let err = run(&ctx, root, &RunOptions::default()).unwrap_err();
        match err {
            HousekeepError::ModulesFailed { count, first, written } => {
                assert_eq!(count, 1);
                assert!(matches!(*first, HousekeepError::ConfigParse { .. }));
                assert_eq!(
                    written,
                    vec![root.join("beta/sources.cmake"), root.join("modules.cmake")]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(
            std::fs::read_to_string(root.join("beta/sources.cmake")).unwrap(),
            "list(APPEND SOURCE_LIST \"src/b.cpp\")\n"
        );
        assert_eq!(
            std::fs::read_to_string(root.join("modules.cmake")).unwrap(),
            "list(APPEND MODULE_LIST \"alpha\")\nlist(APPEND MODULE_LIST \"beta\")\n"
        );
        assert!(!root.join("alpha/sources.cmake").exists());
    }

    #[test]
    fn run_module_skips_the_index() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("core");
        std::fs::create_dir_all(module.join("test")).unwrap();
        std::fs::write(module.join("test/core_test.cpp"), "").unwrap();

        let ctx = ServiceContext::live();
        let report = run_module(&ctx, &module, &RunOptions::default()).unwrap();
        assert_eq!(report.modules, vec!["core"]);
        assert_eq!(report.written, vec![module.join("sources.cmake")]);
        assert!(!dir.path().join("modules.cmake").exists());
    }

    #[test]
    fn dotted_module_dir_still_lists_files() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("core");
        std::fs::create_dir_all(module.join("src")).unwrap();
        std::fs::write(module.join("src/core.cpp"), "").unwrap();

        let ctx = ServiceContext::live();
        let dotted = dir.path().join(".").join("core").join(".");
        let report = run_module(&ctx, &dotted, &RunOptions::default()).unwrap();
        assert_eq!(report.modules, vec!["core"]);
        assert_eq!(report.written, vec![module.join("sources.cmake")]);
        assert_eq!(
            std::fs::read_to_string(module.join("sources.cmake")).unwrap(),
            "list(APPEND SOURCE_LIST \"src/core.cpp\")\n"
        );
    }
}

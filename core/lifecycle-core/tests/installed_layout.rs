//! Integration tests for a hook installed at `<project>/.claude/hooks/`.

use filetime::FileTime;
use lifecycle_core::cleanup::{run_providers, wire_providers};
use lifecycle_core::logs::prune_logs;
use lifecycle_core::startup::startup_context;
use lifecycle_core::{HookConfig, RootResolver, RootStrategy, StorageConfig};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

struct Layout {
    _tmp: TempDir,
    project: PathBuf,
    hooks: PathBuf,
}

fn installed_project() -> Layout {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let project = std::fs::canonicalize(tmp.path()).unwrap().join("project");
    let hooks = project.join(".claude/hooks");
    std::fs::create_dir_all(&hooks).unwrap();
    std::fs::create_dir_all(project.join(".git")).unwrap();
    std::fs::create_dir_all(project.join(".claude/docs")).unwrap();
    std::fs::write(project.join("README.md"), "# Project\n").unwrap();
    std::fs::write(
        project.join(".claude/docs/orchestrator-workflow.md"),
        "w".repeat(600),
    )
    .unwrap();
    Layout {
        _tmp: tmp,
        project,
        hooks,
    }
}

fn write_aged(path: &Path, content: &str, age: Duration) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
    let when = SystemTime::now() - age;
    filetime::set_file_mtime(path, FileTime::from_system_time(when)).unwrap();
}

#[test]
fn startup_flow_against_installed_layout() {
    let layout = installed_project();

    let root = RootResolver::new(&layout.hooks)
        .with_git(None)
        .resolve()
        .expect("root should resolve");
    assert_eq!(root.strategy, RootStrategy::MarkerWalk);
    assert_eq!(root.path, layout.project);

    let storage = StorageConfig::for_root(&root.path);
    let config = HookConfig::load(&storage);

    let context = startup_context(&storage, &config, &layout.project).unwrap();
    assert!(context.contains("\"loaded_docs\": 2"));
    assert!(context.contains("\"total_docs\": 8"));
    assert!(context.contains(&format!("{}...", "w".repeat(500))));
    assert!(context.contains("\"docs/00-project/SPEC.md\""));
}

#[test]
fn housekeeping_respects_config() {
    let layout = installed_project();
    let storage = StorageConfig::for_root(&layout.project);
    std::fs::write(
        storage.config_file(),
        r#"{"artifacts": {"enabled": false}, "log_retention_days": 1}"#,
    )
    .unwrap();
    let config = HookConfig::load(&storage);

    let stale_artifact = storage.resolve(".claude/logs/artifacts/review.json");
    let stale_script = storage.resolve(".claude/logs/temp-scripts/probe.py");
    write_aged(&stale_artifact, "{}", Duration::from_secs(30 * 24 * 3600));
    write_aged(&stale_script, "print()", Duration::from_secs(2 * 24 * 3600));

    let summaries = run_providers(&wire_providers(&storage, &config), false);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].provider, "temp-scripts");
    assert!(stale_artifact.exists());
    assert!(!stale_script.exists());

    std::fs::write(
        storage.log_file("startup"),
        "2001-01-01T00:00:00Z  INFO old\n",
    )
    .unwrap();
    let stats = prune_logs(&storage.log_dir(), config.log_retention_days).unwrap();
    assert_eq!(stats.removed, 1);
    assert_eq!(stats.files, 1);
}

//! Hook configuration loading.
//!
//! Configuration is optional: a missing file yields defaults, and so does a
//! malformed one (logged as a warning). Every key is optional, and a partial
//! cleanup block only overrides the keys it names.
//!
//! ```json
//! {
//!   "critical_docs": ["README.md"],
//!   "excerpt_chars": 500,
//!   "log_retention_days": 2,
//!   "temp_scripts": { "enabled": false }
//! }
//! ```

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::{HookError, Result};
use crate::storage::StorageConfig;

/// Documentation loaded into the startup context, relative to the root.
pub const DEFAULT_CRITICAL_DOCS: &[&str] = &[
    "README.md",
    ".claude/docs/agent-standards-runtime.md",
    ".claude/docs/guides/agent-selection-guide.md",
    ".claude/docs/guides/file-operation-protocol.md",
    ".claude/docs/guides/tool-parallelization-patterns.md",
    ".claude/docs/orchestrator-workflow.md",
    "docs/00-project/SPEC.md",
    "docs/00-project/COMPONENT_ALMANAC.md",
];

pub const DEFAULT_EXCERPT_CHARS: usize = 500;
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 2;

/// A directory swept for stale files by a cleanup provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupTarget {
    pub enabled: bool,
    /// Provider name used in logs and `--target`.
    pub name: String,
    /// Directory relative to the project root.
    pub dir: String,
    /// File extensions (without dot) eligible for deletion; empty = any.
    pub extensions: Vec<String>,
    pub max_age_hours: u64,
}

impl CleanupTarget {
    /// Code review artifacts, kept for a week.
    pub fn artifacts() -> Self {
        Self {
            enabled: true,
            name: "artifacts".to_string(),
            dir: ".claude/logs/artifacts".to_string(),
            extensions: Vec::new(),
            max_age_hours: 7 * 24,
        }
    }

    /// Throwaway scripts written by agents, kept for a day.
    pub fn temp_scripts() -> Self {
        Self {
            enabled: true,
            name: "temp-scripts".to_string(),
            dir: ".claude/logs/temp-scripts".to_string(),
            extensions: ["py", "sh", "js", "ts"].iter().map(|s| s.to_string()).collect(),
            max_age_hours: 24,
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_hours.saturating_mul(3600))
    }

    fn apply(mut self, overrides: TargetOverrides) -> Self {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(dir) = overrides.dir {
            self.dir = dir;
        }
        if let Some(extensions) = overrides.extensions {
            self.extensions = extensions;
        }
        if let Some(hours) = overrides.max_age_hours {
            self.max_age_hours = hours;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookConfig {
    pub critical_docs: Vec<String>,
    pub excerpt_chars: usize,
    pub log_retention_days: u32,
    pub artifacts: CleanupTarget,
    pub temp_scripts: CleanupTarget,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            critical_docs: DEFAULT_CRITICAL_DOCS.iter().map(|s| s.to_string()).collect(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            log_retention_days: DEFAULT_LOG_RETENTION_DAYS,
            artifacts: CleanupTarget::artifacts(),
            temp_scripts: CleanupTarget::temp_scripts(),
        }
    }
}

/// On-disk shape: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    critical_docs: Option<Vec<String>>,
    excerpt_chars: Option<usize>,
    log_retention_days: Option<u32>,
    artifacts: TargetOverrides,
    temp_scripts: TargetOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TargetOverrides {
    enabled: Option<bool>,
    dir: Option<String>,
    extensions: Option<Vec<String>>,
    max_age_hours: Option<u64>,
}

impl From<ConfigFile> for HookConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = HookConfig::default();
        Self {
            critical_docs: file.critical_docs.unwrap_or(defaults.critical_docs),
            excerpt_chars: file.excerpt_chars.unwrap_or(defaults.excerpt_chars),
            log_retention_days: file
                .log_retention_days
                .unwrap_or(defaults.log_retention_days),
            artifacts: defaults.artifacts.apply(file.artifacts),
            temp_scripts: defaults.temp_scripts.apply(file.temp_scripts),
        }
    }
}

impl HookConfig {
    /// Every configured cleanup target, enabled or not.
    pub fn cleanup_targets(&self) -> [&CleanupTarget; 2] {
        [&self.artifacts, &self.temp_scripts]
    }

    /// Parses config JSON, filling unspecified keys with defaults.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<ConfigFile>(content).map(Self::from)
    }

    /// Reads the config file. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(HookError::io("reading hook config", err)),
        };

        Self::from_json(&content)
            .map(Some)
            .map_err(|err| HookError::ConfigMalformed {
                path: path.to_path_buf(),
                details: err.to_string(),
            })
    }

    /// Loads the config for `storage`, returning defaults on any failure.
    pub fn load(storage: &StorageConfig) -> Self {
        match Self::read(&storage.config_file()) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "Using default hook config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, content: &str) -> StorageConfig {
        let storage = StorageConfig::for_root(tmp.path());
        std::fs::create_dir_all(storage.claude_dir()).unwrap();
        std::fs::write(storage.config_file(), content).unwrap();
        storage
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let storage = StorageConfig::for_root(tmp.path());

        assert!(HookConfig::read(&storage.config_file()).unwrap().is_none());
        assert_eq!(HookConfig::load(&storage), HookConfig::default());
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = HookConfig::default();
        assert_eq!(config.critical_docs.len(), 8);
        assert_eq!(config.critical_docs[0], "README.md");
        assert_eq!(config.excerpt_chars, 500);
        assert_eq!(config.log_retention_days, 2);
        assert_eq!(config.temp_scripts.max_age(), Duration::from_secs(86_400));
    }

    #[test]
    fn partial_target_block_keeps_slot_defaults() {
        let tmp = TempDir::new().unwrap();
        let storage = write_config(
            &tmp,
            r#"{"excerpt_chars": 80, "temp_scripts": {"enabled": false}}"#,
        );

        let config = HookConfig::load(&storage);

        assert_eq!(config.excerpt_chars, 80);
        assert_eq!(config.log_retention_days, 2);
        assert!(!config.temp_scripts.enabled);
        assert_eq!(config.temp_scripts.name, "temp-scripts");
        assert_eq!(config.temp_scripts.dir, ".claude/logs/temp-scripts");
        assert_eq!(config.artifacts, CleanupTarget::artifacts());
    }

    #[test]
    fn target_name_is_not_configurable() {
        let config = HookConfig::from_json(r#"{"artifacts": {"name": "other", "max_age_hours": 1}}"#)
            .unwrap();

        assert_eq!(config.artifacts.name, "artifacts");
        assert_eq!(config.artifacts.max_age_hours, 1);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let storage = write_config(&tmp, r#"{"future_option": true, "log_retention_days": 3}"#);

        assert_eq!(HookConfig::load(&storage).log_retention_days, 3);
    }

    #[test]
    fn malformed_file_is_an_error_but_load_recovers() {
        let tmp = TempDir::new().unwrap();
        let storage = write_config(&tmp, "{ not json");

        let err = HookConfig::read(&storage.config_file()).unwrap_err();
        assert!(matches!(err, HookError::ConfigMalformed { .. }));
        assert_eq!(HookConfig::load(&storage), HookConfig::default());
    }
}

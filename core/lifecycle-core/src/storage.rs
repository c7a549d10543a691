//! Storage layout for hook data.
//!
//! Centralizes every path the hooks read or write so tests can inject a
//! temporary root with `StorageConfig::for_root(tmp)`.
//!
//! ```text
//! <root>/
//!   .claude/
//!     lifecycle-hooks.json     optional configuration
//!     hooks/                   installed hook binaries
//!     logs/<hook>.log          per-hook log files
//! ```

use std::path::{Path, PathBuf};

pub const CLAUDE_DIR: &str = ".claude";
pub const CONFIG_FILE: &str = "lifecycle-hooks.json";
pub const LOG_DIR: &str = "logs";
pub const LOG_EXTENSION: &str = "log";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project root every relative path is joined onto.
    root: PathBuf,
}

impl StorageConfig {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage anchored at the home directory, used when no project root
    /// could be resolved. Falls back to the temp dir on homeless systems.
    pub fn home_fallback() -> Self {
        let root = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn claude_dir(&self) -> PathBuf {
        self.root.join(CLAUDE_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.claude_dir().join(CONFIG_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.claude_dir().join(LOG_DIR)
    }

    /// Log file for a single hook, e.g. `.claude/logs/startup.log`.
    pub fn log_file(&self, hook_name: &str) -> PathBuf {
        self.log_dir().join(format!("{}.{}", hook_name, LOG_EXTENSION))
    }

    /// Joins a root-relative path (documentation, cleanup targets).
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_root() {
        let storage = StorageConfig::for_root("/project");
        assert_eq!(
            storage.config_file(),
            PathBuf::from("/project/.claude/lifecycle-hooks.json")
        );
        assert_eq!(storage.log_dir(), PathBuf::from("/project/.claude/logs"));
        assert_eq!(
            storage.log_file("startup"),
            PathBuf::from("/project/.claude/logs/startup.log")
        );
        assert_eq!(
            storage.resolve("docs/00-project/SPEC.md"),
            PathBuf::from("/project/docs/00-project/SPEC.md")
        );
    }

    #[test]
    fn home_fallback_has_absolute_root() {
        assert!(StorageConfig::home_fallback().root().is_absolute());
    }
}

//! Per-invocation hook context: session, root, storage and config.
//!
//! Built before logging starts (log files live under the resolved root), so
//! the resolution outcome is kept and logged afterwards.

use lifecycle_core::root::{find_project_root, DEFAULT_GIT_TIMEOUT};
use lifecycle_core::{HookConfig, HookError, ResolvedRoot, RootError, StorageConfig};
use std::env;
use std::path::PathBuf;

const SESSION_ENV: &str = "CLAUDE_SESSION_ID";
const UNKNOWN_SESSION: &str = "unknown";

pub struct HookContext {
    pub hook_name: &'static str,
    pub session_id: String,
    pub storage: StorageConfig,
    pub config: HookConfig,
    root: Result<ResolvedRoot, RootError>,
}

impl HookContext {
    pub fn resolve(hook_name: &'static str) -> Self {
        Self::from_root(hook_name, find_project_root(DEFAULT_GIT_TIMEOUT))
    }

    /// Without a root, storage falls back to the home directory and the
    /// config to defaults.
    pub fn from_root(hook_name: &'static str, root: Result<ResolvedRoot, RootError>) -> Self {
        let storage = match &root {
            Ok(resolved) => StorageConfig::for_root(&resolved.path),
            Err(_) => StorageConfig::home_fallback(),
        };
        let config = if root.is_ok() {
            HookConfig::load(&storage)
        } else {
            HookConfig::default()
        };

        Self {
            hook_name,
            session_id: session_id(),
            storage,
            config,
            root,
        }
    }

    /// The project root, or the resolution failure as a hook error.
    pub fn root(&self) -> Result<&ResolvedRoot, HookError> {
        self.root.as_ref().map_err(|err| HookError::Root(err.clone()))
    }

    pub fn log_file(&self) -> PathBuf {
        self.storage.log_file(self.hook_name)
    }

    pub fn log_resolution(&self) {
        match &self.root {
            Ok(resolved) => tracing::debug!(
                root = %resolved.path.display(),
                strategy = %resolved.strategy,
                "Project root resolved"
            ),
            Err(err) => tracing::warn!(
                error = %err,
                fallback = %self.storage.root().display(),
                "Project root not determined"
            ),
        }
    }
}

fn session_id() -> String {
    env::var(SESSION_ENV)
        .ok()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| UNKNOWN_SESSION.to_string())
}

//! Stale artifact cleanup.
//!
//! Cleanup is a pluggable capability: hooks hold a list of
//! [`CleanupProvider`]s wired once at startup from configuration. A disabled
//! target contributes no provider, so running an empty list is a no-op.
//!
//! The built-in [`StaleFileCleanup`] deletes files older than a max age
//! from one directory tree. Per-file failures are collected in the summary
//! rather than aborting the sweep.

use fs_err as fs;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

use crate::config::{CleanupTarget, HookConfig};
use crate::error::{HookError, Result};
use crate::storage::StorageConfig;

/// Something that can sweep stale files.
pub trait CleanupProvider {
    fn name(&self) -> &str;

    /// Deletes (or with `dry_run`, only counts) stale files.
    fn cleanup(&self, dry_run: bool) -> Result<CleanupSummary>;
}

/// Results from a cleanup sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupSummary {
    pub provider: String,
    pub dry_run: bool,
    /// Files deleted, or that would be deleted in a dry run.
    pub files_deleted: u32,
    pub bytes_reclaimed: u64,
    pub size_human: String,
    pub errors: Vec<String>,
}

impl CleanupSummary {
    fn new(provider: &str, dry_run: bool) -> Self {
        Self {
            provider: provider.to_string(),
            dry_run,
            size_human: format_size(0),
            ..Default::default()
        }
    }
}

/// Deletes files under `dir` whose modification time is older than `max_age`.
#[derive(Debug, Clone)]
pub struct StaleFileCleanup {
    name: String,
    dir: PathBuf,
    extensions: Vec<String>,
    max_age: Duration,
}

impl StaleFileCleanup {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            extensions: Vec::new(),
            max_age,
        }
    }

    pub fn from_target(storage: &StorageConfig, target: &CleanupTarget) -> Self {
        Self::new(&target.name, storage.resolve(&target.dir), target.max_age())
            .with_extensions(target.extensions.iter().cloned())
    }

    /// Restricts deletion to the given extensions (without dot, case-insensitive).
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    fn is_stale(&self, modified: SystemTime, now: SystemTime) -> bool {
        now.duration_since(modified)
            .map(|age| age > self.max_age)
            .unwrap_or(false)
    }
}

impl CleanupProvider for StaleFileCleanup {
    fn name(&self) -> &str {
        &self.name
    }

    fn cleanup(&self, dry_run: bool) -> Result<CleanupSummary> {
        let mut summary = CleanupSummary::new(&self.name, dry_run);
        if !self.dir.is_dir() {
            tracing::debug!(dir = %self.dir.display(), "Cleanup target missing, nothing to do");
            return Ok(summary);
        }

        let now = SystemTime::now();
        // Directories that lost an entry in this sweep; only these are removed when empty.
        let mut emptied: HashSet<PathBuf> = HashSet::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    summary.errors.push(err.to_string());
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                if !dry_run && emptied.contains(path) && is_empty_dir(path) {
                    match fs::remove_dir(path) {
                        Ok(()) => mark_parent(&mut emptied, path),
                        Err(err) => summary.errors.push(err.to_string()),
                    }
                }
                continue;
            }
            if !entry.file_type().is_file() || !self.matches_extension(path) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    summary.errors.push(err.to_string());
                    continue;
                }
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            if !self.is_stale(modified, now) {
                continue;
            }

            if !dry_run {
                if let Err(err) = fs::remove_file(path) {
                    summary.errors.push(err.to_string());
                    continue;
                }
                mark_parent(&mut emptied, path);
            }
            tracing::debug!(path = %path.display(), dry_run, "Stale file swept");
            summary.files_deleted += 1;
            summary.bytes_reclaimed += metadata.len();
        }

        summary.size_human = format_size(summary.bytes_reclaimed);
        Ok(summary)
    }
}

fn mark_parent(emptied: &mut HashSet<PathBuf>, path: &Path) {
    if let Some(parent) = path.parent() {
        emptied.insert(parent.to_path_buf());
    }
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Builds providers for every enabled target. Decided once per process.
pub fn wire_providers(
    storage: &StorageConfig,
    config: &HookConfig,
) -> Vec<Box<dyn CleanupProvider>> {
    config
        .cleanup_targets()
        .into_iter()
        .filter(|target| target.enabled)
        .map(|target| {
            Box::new(StaleFileCleanup::from_target(storage, target)) as Box<dyn CleanupProvider>
        })
        .collect()
}

/// Keeps only the provider called `name`, or every provider for `"all"`.
pub fn select_providers(
    providers: Vec<Box<dyn CleanupProvider>>,
    name: &str,
    config: &HookConfig,
) -> Result<Vec<Box<dyn CleanupProvider>>> {
    if name == "all" {
        return Ok(providers);
    }
    if !config.cleanup_targets().iter().any(|t| t.name == name) {
        return Err(HookError::UnknownTarget(name.to_string()));
    }
    Ok(providers.into_iter().filter(|p| p.name() == name).collect())
}

/// Runs every provider, logging failures and non-empty results.
pub fn run_providers(providers: &[Box<dyn CleanupProvider>], dry_run: bool) -> Vec<CleanupSummary> {
    let mut summaries = Vec::with_capacity(providers.len());
    for provider in providers {
        match provider.cleanup(dry_run) {
            Ok(summary) => {
                if summary.files_deleted > 0 {
                    tracing::info!(
                        provider = provider.name(),
                        files_deleted = summary.files_deleted,
                        size_reclaimed = %summary.size_human,
                        dry_run,
                        "Cleanup removed stale files"
                    );
                }
                for error in &summary.errors {
                    tracing::warn!(provider = provider.name(), error = %error, "Cleanup error (non-critical)");
                }
                summaries.push(summary);
            }
            Err(err) => {
                tracing::warn!(provider = provider.name(), error = %err, "Cleanup failed (non-critical)");
            }
        }
    }
    summaries
}

/// Human-readable byte size: `512 B`, `1.5 KB`, `3.0 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

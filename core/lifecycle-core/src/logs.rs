//! Log retention for hook log files.
//!
//! Hook logs are append-only text files with one RFC 3339 timestamp at the
//! start of every event line. Pruning drops lines older than the retention
//! window. Lines without a timestamp (multi-line messages) travel with the
//! entry above them.
//!
//! Prune before the logging subscriber opens the file: rewriting replaces
//! the file, and an already-open append handle would keep writing to the
//! unlinked copy.

use chrono::{DateTime, Duration, Utc};
use fs_err as fs;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{HookError, Result};
use crate::storage::LOG_EXTENSION;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LogPruneStats {
    /// Lines dropped across all files.
    pub removed: usize,
    /// Lines retained across all files.
    pub kept: usize,
    /// Log files inspected.
    pub files: usize,
    /// Log files that could not be read or rewritten.
    pub failed: usize,
}

/// Prunes every `*.log` file in `log_dir`, keeping the last `days_to_keep` days.
pub fn prune_logs(log_dir: &Path, days_to_keep: u32) -> Result<LogPruneStats> {
    let cutoff = Utc::now() - Duration::days(i64::from(days_to_keep));
    prune_logs_before(log_dir, cutoff)
}

/// Only an unreadable directory is an error; a failing file is counted and skipped.
pub fn prune_logs_before(log_dir: &Path, cutoff: DateTime<Utc>) -> Result<LogPruneStats> {
    if !log_dir.is_dir() {
        return Ok(LogPruneStats::default());
    }

    let entries = fs::read_dir(log_dir).map_err(|e| HookError::io("listing log directory", e))?;
    let logs = entries.flatten().map(|entry| entry.path()).filter(|path| {
        path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION)
    });

    Ok(prune_files(logs, cutoff))
}

fn prune_files(paths: impl IntoIterator<Item = PathBuf>, cutoff: DateTime<Utc>) -> LogPruneStats {
    let mut stats = LogPruneStats::default();
    for path in paths {
        match prune_log_file(&path, cutoff) {
            Ok((removed, kept)) => {
                stats.removed += removed;
                stats.kept += kept;
                stats.files += 1;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Skipping log file");
                stats.failed += 1;
            }
        }
    }
    stats
}

/// Rewrites `path` without lines older than `cutoff`. Returns (removed, kept).
///
/// Kept lines are copied byte for byte; the file keeps its permissions.
pub fn prune_log_file(path: &Path, cutoff: DateTime<Utc>) -> Result<(usize, usize)> {
    let bytes = fs::read(path).map_err(|e| HookError::io("reading log file", e))?;

    let mut kept_lines: Vec<&[u8]> = Vec::new();
    let mut removed = 0;
    // Lines before the first timestamp are kept.
    let mut keep_current = true;

    for line in bytes.split_inclusive(|&b| b == b'\n') {
        if let Some(at) = entry_timestamp(&String::from_utf8_lossy(line)) {
            keep_current = at >= cutoff;
        }
        if keep_current {
            kept_lines.push(line);
        } else {
            removed += 1;
        }
    }

    let kept = kept_lines.len();
    if removed == 0 {
        return Ok((0, kept));
    }

    let permissions = fs::metadata(path)
        .map_err(|e| HookError::io("reading log file metadata", e))?
        .permissions();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|e| HookError::io("creating temp log file", e))?;
    for line in &kept_lines {
        tmp.write_all(line)
            .map_err(|e| HookError::io("writing pruned log", e))?;
    }
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| HookError::io("copying log file permissions", e))?;
    tmp.persist(path)
        .map_err(|e| HookError::io("replacing log file", e.error))?;

    Ok((removed, kept))
}

/// Timestamp at the start of a log line, if any.
fn entry_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let first = line.split_whitespace().next()?;
    DateTime::parse_from_rfc3339(first)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::format_iso;
    use tempfile::TempDir;

    fn line(at: DateTime<Utc>, msg: &str) -> String {
        format!("{}  INFO startup: {}", format_iso(at), msg)
    }

    #[test]
    fn parses_leading_timestamp_only() {
        assert!(entry_timestamp("2025-09-26T19:45:23.456789Z  INFO hi").is_some());
        assert!(entry_timestamp("    at frame 3").is_none());
        assert!(entry_timestamp("").is_none());
    }

    #[test]
    fn drops_old_entries_and_their_continuations() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("startup.log");
        let now = Utc::now();
        let content = [
            line(now - Duration::days(5), "old"),
            "    continuation of old".to_string(),
            line(now - Duration::hours(1), "recent"),
            "    continuation of recent".to_string(),
        ]
        .join("\n");
        std::fs::write(&path, content + "\n").unwrap();

        let (removed, kept) = prune_log_file(&path, now - Duration::days(2)).unwrap();

        assert_eq!((removed, kept), (2, 2));
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(!rewritten.contains("old"));
        assert!(rewritten.contains("recent"));
        assert!(rewritten.ends_with("continuation of recent\n"));
    }

    #[test]
    fn untouched_file_is_not_rewritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("phase-summary.log");
        let original = format!("preamble without stamp\n{}\n", line(Utc::now(), "fresh"));
        std::fs::write(&path, &original).unwrap();

        let (removed, kept) = prune_log_file(&path, Utc::now() - Duration::days(2)).unwrap();

        assert_eq!((removed, kept), (0, 2));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn prune_logs_only_touches_log_files() {
        let tmp = TempDir::new().unwrap();
        let old = line(Utc::now() - Duration::days(10), "ancient");
        std::fs::write(tmp.path().join("a.log"), format!("{}\n", old)).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), format!("{}\n", old)).unwrap();
        std::fs::create_dir(tmp.path().join("artifacts")).unwrap();

        let stats = prune_logs(tmp.path(), 2).unwrap();

        assert_eq!(
            stats,
            LogPruneStats {
                removed: 1,
                kept: 0,
                files: 1,
                failed: 0
            }
        );
        assert_eq!(std::fs::read_to_string(tmp.path().join("a.log")).unwrap(), "");
        assert!(std::fs::read_to_string(tmp.path().join("notes.txt"))
            .unwrap()
            .contains("ancient"));
    }

    #[test]
    fn missing_log_dir_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let stats = prune_logs(&tmp.path().join("logs"), 2).unwrap();
        assert_eq!(stats, LogPruneStats::default());
    }

    #[test]
    fn failing_file_does_not_stop_the_sweep() {
        let tmp = TempDir::new().unwrap();
        let readable = tmp.path().join("startup.log");
        let old = line(Utc::now() - Duration::days(10), "ancient");
        std::fs::write(&readable, format!("{}\n", old)).unwrap();

        let stats = prune_files(
            [tmp.path().join("vanished.log"), readable.clone()],
            Utc::now() - Duration::days(2),
        );

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.files, 1);
        assert_eq!(stats.removed, 1);
        assert_eq!(std::fs::read_to_string(&readable).unwrap(), "");
    }

    #[test]
    fn kept_lines_are_copied_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("startup.log");
        let now = Utc::now();
        let mut content = format!("{}\r\n", line(now - Duration::days(5), "old")).into_bytes();
        let recent = format!("{} caf\u{e9} ", line(now, "recent"));
        content.extend_from_slice(recent.as_bytes());
        content.extend_from_slice(&[0xff, 0xfe]);
        content.extend_from_slice(b"\r\ntail without newline");
        std::fs::write(&path, &content).unwrap();

        let (removed, kept) = prune_log_file(&path, now - Duration::days(2)).unwrap();

        assert_eq!((removed, kept), (1, 2));
        let mut expected = recent.into_bytes();
        expected.extend_from_slice(&[0xff, 0xfe]);
        expected.extend_from_slice(b"\r\ntail without newline");
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cleanup.log");
        let old = line(Utc::now() - Duration::days(10), "ancient");
        std::fs::write(&path, format!("{}\n", old)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        prune_log_file(&path, Utc::now() - Duration::days(2)).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}

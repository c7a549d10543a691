//! Process-wide logging for a single hook invocation.
//!
//! Each hook writes to `<log dir>/<hook>.log` through a non-blocking appender.
//! The returned guard flushes the background writer when dropped, so `main`
//! must return normally instead of calling `process::exit`.
//!
//! Filter: `LIFECYCLE_HOOK_DEBUG=1` forces debug, otherwise `RUST_LOG`,
//! otherwise `info`.

use fs_err as fs;
use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "LIFECYCLE_HOOK_DEBUG";

pub fn init(log_dir: &Path, hook_name: &str) -> Option<WorkerGuard> {
    let appender = match fs::create_dir_all(log_dir)
        .map_err(|err| err.to_string())
        .and_then(|()| file_appender(log_dir, hook_name).map_err(|err| err.to_string()))
    {
        Ok(appender) => appender,
        Err(err) => {
            init_stderr();
            tracing::warn!(error = %err, dir = %log_dir.display(), "Log file unavailable, logging to stderr");
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .try_init();

    installed.ok().map(|()| guard)
}

/// Appender for `<log_dir>/<hook_name>.log`, never rotated by time.
/// Old lines are pruned instead (see `lifecycle_core::logs`).
pub fn file_appender(log_dir: &Path, hook_name: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(hook_name)
        .filename_suffix("log")
        .build(log_dir)
}

fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn env_filter() -> EnvFilter {
    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

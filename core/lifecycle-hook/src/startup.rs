//! Session start hook.
//!
//! Prunes old log lines, sweeps stale artifacts, then prints the startup
//! context (critical documentation + working directory reminders) as HTML
//! comments for the host. Any failure prints the fallback context instead.

use lifecycle_core::cleanup::{run_providers, wire_providers};
use lifecycle_core::startup::{fallback_context, startup_context};
use lifecycle_core::{HookError, HookInput, LogPruneStats};
use std::env;

use crate::context::HookContext;
use crate::guard;

pub fn run(ctx: &HookContext, pruned: Option<lifecycle_core::Result<LogPruneStats>>) {
    tracing::info!("Session startup initiated");
    report_prune(pruned);
    read_input();

    guard::print(startup_output(ctx));
}

/// The startup context, or the fallback block naming the log file.
fn startup_output(ctx: &HookContext) -> String {
    let outcome = guard::catch(|| {
        ctx.root()?;

        let providers = wire_providers(&ctx.storage, &ctx.config);
        run_providers(&providers, false);

        let cwd = env::current_dir().map_err(|e| HookError::io("reading working directory", e))?;
        startup_context(&ctx.storage, &ctx.config, &cwd)
    });

    match outcome {
        Ok(context) => {
            tracing::info!("Startup evaluation completed successfully");
            context
        }
        Err(message) => {
            tracing::error!(error = %message, "Startup evaluation failed");
            fallback_context(&ctx.log_file())
        }
    }
}

fn report_prune(pruned: Option<lifecycle_core::Result<LogPruneStats>>) {
    match pruned {
        Some(Ok(stats)) if stats.removed > 0 => tracing::info!(
            removed = stats.removed,
            kept = stats.kept,
            failed = stats.failed,
            "Log cleanup: removed old entries"
        ),
        Some(Ok(stats)) => tracing::info!(
            kept = stats.kept,
            failed = stats.failed,
            "Log cleanup: no old entries to remove"
        ),
        Some(Err(err)) => tracing::warn!(error = %err, "Log cleanup failed (non-critical)"),
        None => {}
    }
}

/// Drains stdin so the host never sees a broken pipe; the payload is only logged.
fn read_input() {
    match HookInput::from_stdin() {
        Ok(Some(input)) => tracing::info!(
            event_type = input.event_name(),
            payload_session = input.session_id.as_deref().unwrap_or("none"),
            "SessionStart hook triggered"
        ),
        Ok(None) => tracing::info!("No JSON input for SessionStart"),
        Err(err) => tracing::info!(error = %err, "Unreadable JSON input for SessionStart"),
    }
}

//! Standalone cleanup hook: sweeps stale artifacts and temp scripts.
//!
//! ```bash
//! lifecycle-hook cleanup --dry-run --target temp-scripts
//! ```

use lifecycle_core::cleanup::{run_providers, select_providers, wire_providers};
use lifecycle_core::CleanupSummary;

use crate::context::HookContext;
use crate::guard;

pub fn run(ctx: &HookContext, dry_run: bool, target: &str) {
    let outcome = guard::catch(|| {
        ctx.root()?;
        let providers = select_providers(
            wire_providers(&ctx.storage, &ctx.config),
            target,
            &ctx.config,
        )?;
        Ok(run_providers(&providers, dry_run))
    });

    match outcome {
        Ok(summaries) => {
            for summary in &summaries {
                guard::print(describe(summary));
            }
        }
        Err(message) => {
            tracing::warn!(error = %message, "Cleanup failed (non-critical)");
            guard::print_err(format_args!("⚠️ Cleanup failed: {}", message));
        }
    }
}

fn describe(summary: &CleanupSummary) -> String {
    let verb = if summary.dry_run {
        "would remove"
    } else {
        "removed"
    };
    let mut line = format!(
        "{}: {} {} files, reclaimed {}",
        summary.provider, verb, summary.files_deleted, summary.size_human
    );
    if !summary.errors.is_empty() {
        line.push_str(&format!(" ({} errors)", summary.errors.len()));
    }
    line
}

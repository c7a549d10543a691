//! lifecycle-hook: lifecycle hooks for an AI coding-assistant host.
//!
//! Installed at `<project>/.claude/hooks/lifecycle-hook` and configured as a
//! hook command in the host's settings. Every subcommand exits 0, whatever
//! happens internally, so the host workflow is never blocked.
//!
//! ## Subcommands
//!
//! - `startup`: Session start. Prunes logs, sweeps artifacts, prints context
//! - `phase-summary`: Phase completion summary (sub-agent stop)
//! - `cleanup`: Sweep stale artifacts and temp scripts on demand
//! - `root`: Print the resolved project root

mod cleanup;
mod context;
mod guard;
mod logging;
mod phase_summary;
mod root;
mod startup;

use clap::{Parser, Subcommand};
use lifecycle_core::logs::prune_logs;

use context::HookContext;

#[derive(Parser)]
#[command(name = "lifecycle-hook")]
#[command(about = "Lifecycle hooks for AI coding-assistant sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session start: emit critical documentation context (reads optional JSON from stdin)
    Startup,

    /// Print the phase completion summary
    PhaseSummary,

    /// Delete stale artifacts and temporary scripts
    Cleanup {
        /// Report what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,

        /// Cleanup target: artifacts, temp-scripts or all
        #[arg(long, default_value = "all")]
        target: String,
    },

    /// Print the resolved project root
    Root {
        /// Also print the resolution strategy
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    fn hook_name(&self) -> &'static str {
        match self {
            Commands::Startup => "startup",
            Commands::PhaseSummary => "phase-summary",
            Commands::Cleanup { .. } => "cleanup",
            Commands::Root { .. } => "root",
        }
    }
}

fn main() {
    // clap would exit 2 on bad arguments; hooks always exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };
    let ctx = HookContext::resolve(cli.command.hook_name());

    // Prune before the appender opens the hook's log file.
    // Only inside a resolved project; the home fallback may hold other logs.
    let pruned = (matches!(cli.command, Commands::Startup) && ctx.root().is_ok())
        .then(|| prune_logs(&ctx.storage.log_dir(), ctx.config.log_retention_days));

    let _logging_guard = logging::init(&ctx.storage.log_dir(), ctx.hook_name);
    guard::install_panic_hook();
    let _span = tracing::info_span!("hook", hook = ctx.hook_name, session_id = %ctx.session_id)
        .entered();
    ctx.log_resolution();

    match cli.command {
        Commands::Startup => startup::run(&ctx, pruned),
        Commands::PhaseSummary => phase_summary::run(&ctx),
        Commands::Cleanup { dry_run, target } => cleanup::run(&ctx, dry_run, &target),
        Commands::Root { verbose } => root::run(&ctx, verbose),
    }
}

//! Phase completion hook: prints the WHAT/WHY summary for the user.

use lifecycle_core::summary::phase_summary;
use lifecycle_core::HookInput;

use crate::context::HookContext;
use crate::guard;

pub fn run(ctx: &HookContext) {
    tracing::info!("Starting phase completion summary generation");

    if let Ok(Some(input)) = HookInput::from_stdin() {
        tracing::debug!(event_type = input.event_name(), "Phase summary payload received");
    }

    match guard::catch(|| Ok(phase_summary())) {
        Ok(text) => {
            guard::print(text);
            tracing::info!(hook = ctx.hook_name, "Phase summary generation completed successfully");
        }
        Err(message) => {
            tracing::error!(error = %message, "Phase summary generation failed");
            guard::print_err(format_args!("⚠️ Phase summary generation failed: {}", message));
        }
    }
}

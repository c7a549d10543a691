//! Phase completion summary shown when a sub-agent finishes its phase.

use crate::clock;

/// Renders the summary for the given display time.
pub fn phase_summary_at(time: &str) -> String {
    format!(
        "
📊 Phase Completion Summary
==========================
🗓️ Time: {time}

WHAT: Sub-agent phase completed
WHY: Advancing feature development per orchestrator coordination

ℹ️ No detailed state found - starting fresh or first phase

🔄 Next Steps:
- Return control to main orchestrator
- Await next coordination instructions
- Ready for human collaboration gate if required

📋 Context:
Sub-agent completed its assigned phase and is returning control.
Main orchestrator can proceed with next workflow steps.
"
    )
}

pub fn phase_summary() -> String {
    phase_summary_at(&clock::local_display_time())
}

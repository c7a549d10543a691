//! Startup context emitted at session start.
//!
//! ```text
//! <!--
//! CRITICAL_DOCUMENTATION_CONTEXT
//! { ...json... }
//! -->
//! <!--
//! WORKING_DIRECTORY: /path
//! CRITICAL_REMINDERS: ...
//! -->
//! ```

use std::path::Path;

use crate::config::HookConfig;
use crate::docs::load_critical_documentation;
use crate::error::Result;
use crate::storage::StorageConfig;
use crate::workdir::working_directory_context;

pub const FALLBACK_HEADER: &str =
    "STARTUP_CONTEXT_ERROR: Hook failed to load critical documentation.";

/// Builds the full startup context for `cwd`.
pub fn startup_context(storage: &StorageConfig, config: &HookConfig, cwd: &Path) -> Result<String> {
    let doc_context =
        load_critical_documentation(storage, &config.critical_docs, config.excerpt_chars)
            .render()?;
    Ok(format!(
        "{}\n<!--\n{}\n-->\n",
        doc_context,
        working_directory_context(cwd)
    ))
}

/// Minimal context printed when startup fails, pointing at the log file.
pub fn fallback_context(log_file: &Path) -> String {
    format!(
        "<!--\n{}\nCheck {} for details.\n-->",
        FALLBACK_HEADER,
        log_file.display()
    )
}

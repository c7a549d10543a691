//! Timestamp helpers shared by the hooks.

use chrono::{DateTime, Local, Utc};

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-09-26T19:45:23.456Z`.
pub fn iso_timestamp() -> String {
    format_iso(Utc::now())
}

pub fn format_iso(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Local wall-clock time for human-facing output.
pub fn local_display_time() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

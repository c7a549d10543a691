//! Optional JSON payload the host runtime pipes to hooks on stdin.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{self, IsTerminal, Read};

use crate::error::{HookError, Result};

/// Hook payload. Only the fields the hooks inspect are typed; everything
/// else is preserved in `extra` for logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HookInput {
    /// Event name, preferring the explicit `event` field.
    pub fn event_name(&self) -> &str {
        self.event
            .as_deref()
            .or(self.hook_event_name.as_deref())
            .unwrap_or("unknown")
    }

    /// Parses a payload. Blank input is `Ok(None)`; invalid JSON is an error.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| HookError::json("parsing hook input", e))
    }

    /// Reads and parses stdin. An interactive terminal is treated as no input
    /// so a hook run by hand never waits on the keyboard.
    pub fn from_stdin() -> Result<Option<Self>> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Ok(None);
        }
        let mut raw = String::new();
        stdin
            .lock()
            .read_to_string(&mut raw)
            .map_err(|e| HookError::io("reading stdin", e))?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_none() {
        assert_eq!(HookInput::parse("").unwrap(), None);
        assert_eq!(HookInput::parse("  \n").unwrap(), None);
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(
            HookInput::parse("{oops"),
            Err(HookError::Json { .. })
        ));
    }

    #[test]
    fn typed_fields_and_extras_are_parsed() {
        let input = HookInput::parse(
            r#"{"hook_event_name":"SessionStart","session_id":"abc","source":"startup"}"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(input.event_name(), "SessionStart");
        assert_eq!(input.session_id.as_deref(), Some("abc"));
        assert_eq!(input.extra["source"], "startup");
    }

    #[test]
    fn explicit_event_wins_and_default_is_unknown() {
        let input = HookInput::parse(r#"{"event":"resume","hook_event_name":"SessionStart"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(input.event_name(), "resume");
        assert_eq!(HookInput::default().event_name(), "unknown");
    }
}

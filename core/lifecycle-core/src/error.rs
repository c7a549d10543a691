//! Error types for lifecycle-core operations.

use std::path::PathBuf;

/// Failure of the root resolver.
///
/// Individual strategies never produce errors of their own; only exhausting
/// every strategy does.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("Could not determine project root using any method (anchor: {anchor})")]
    NotDetermined { anchor: PathBuf },

    #[error("Hook location unavailable: {0}")]
    AnchorUnavailable(#[source] std::io::Error),
}

// io::Error is not Clone; keep kind and message.
impl Clone for RootError {
    fn clone(&self) -> Self {
        match self {
            RootError::NotDetermined { anchor } => RootError::NotDetermined {
                anchor: anchor.clone(),
            },
            RootError::AnchorUnavailable(err) => {
                RootError::AnchorUnavailable(std::io::Error::new(err.kind(), err.to_string()))
            }
        }
    }
}

/// All errors that can occur in lifecycle-core operations.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    // ─────────────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error(transparent)]
    Root(#[from] RootError),

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Unknown cleanup target: {0}")]
    UnknownTarget(String),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HookError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HookError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        HookError::Json {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using HookError.
pub type Result<T> = std::result::Result<T, HookError>;

//! Critical documentation context for session startup.
//!
//! Reads a fixed list of root-relative documents and renders a JSON summary
//! inside an HTML comment. The comment keeps the blob out of the user's view
//! while the host runtime still receives it as context.
//!
//! Missing or unreadable documents never fail the load; they are recorded
//! as unavailable entries.

use fs_err as fs;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::clock;
use crate::error::{HookError, Result};
use crate::storage::StorageConfig;

pub const CONTEXT_MARKER: &str = "CRITICAL_DOCUMENTATION_CONTEXT";

/// Rough token estimate: one token per four characters.
pub const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_chars: Option<usize>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocSummary {
    pub total_docs: usize,
    pub loaded_docs: usize,
    pub total_chars: usize,
    pub estimated_tokens: usize,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationContext {
    /// Keyed by file stem when loaded, by configured path otherwise.
    pub critical_documentation: BTreeMap<String, DocEntry>,
    pub summary: DocSummary,
}

impl DocumentationContext {
    /// Renders the context as pretty JSON wrapped in an HTML comment.
    pub fn render(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HookError::json("serializing documentation context", e))?;
        Ok(format!("<!--\n{}\n{}\n-->", CONTEXT_MARKER, json))
    }
}

/// Loads every document in `docs` relative to the storage root.
pub fn load_critical_documentation(
    storage: &StorageConfig,
    docs: &[String],
    excerpt_chars: usize,
) -> DocumentationContext {
    let mut entries = BTreeMap::new();
    let mut total_chars = 0;

    for doc_path in docs {
        let file_path = storage.resolve(doc_path);
        match read_doc(&file_path) {
            Ok(Some(content)) => {
                let size_chars = content.chars().count();
                total_chars += size_chars;
                tracing::info!(doc = %doc_path, chars = size_chars, "Loaded critical doc");
                entries.insert(
                    doc_key(doc_path),
                    DocEntry {
                        path: doc_path.clone(),
                        size_chars: Some(size_chars),
                        available: true,
                        excerpt: Some(excerpt(&content, excerpt_chars)),
                        error: None,
                    },
                );
            }
            Ok(None) => {
                tracing::warn!(doc = %doc_path, "Critical doc not found");
                entries.insert(doc_path.clone(), unavailable(doc_path, None));
            }
            Err(err) => {
                tracing::warn!(doc = %doc_path, error = %err, "Failed to load critical doc");
                entries.insert(
                    doc_path.clone(),
                    unavailable(doc_path, Some(err.to_string())),
                );
            }
        }
    }

    let loaded_docs = entries.values().filter(|e| e.available).count();
    DocumentationContext {
        critical_documentation: entries,
        summary: DocSummary {
            total_docs: docs.len(),
            loaded_docs,
            total_chars,
            estimated_tokens: total_chars / CHARS_PER_TOKEN,
            generated_at: clock::iso_timestamp(),
        },
    }
}

/// First `limit` characters of `content`, with `...` appended when cut.
pub fn excerpt(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
        None => content.to_string(),
    }
}

fn read_doc(path: &Path) -> std::io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path).map(Some)
}

fn doc_key(doc_path: &str) -> String {
    Path::new(doc_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| doc_path.to_string())
}

fn unavailable(doc_path: &str, error: Option<String>) -> DocEntry {
    DocEntry {
        path: doc_path.to_string(),
        size_chars: None,
        available: false,
        excerpt: None,
        error,
    }
}

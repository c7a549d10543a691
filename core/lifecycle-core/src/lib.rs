//! # lifecycle-core
//!
//! Core library for lifecycle hooks run by an AI coding-assistant host at
//! session start, phase completion and cleanup points.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime. One optional subprocess, bounded by a timeout.
//! - **Graceful degradation**: Missing files return empty/default values, not errors.
//! - **Resolve once**: The project root is computed per invocation and passed down.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lifecycle_core::{find_project_root, HookConfig, StorageConfig};
//!
//! let root = find_project_root(Duration::from_secs(10))?;
//! let storage = StorageConfig::for_root(&root.path);
//! let config = HookConfig::load(&storage);
//! ```

pub mod cleanup;
pub mod clock;
pub mod config;
pub mod docs;
pub mod error;
pub mod input;
pub mod logs;
pub mod root;
pub mod startup;
pub mod storage;
pub mod summary;
pub mod workdir;

pub use cleanup::{CleanupProvider, CleanupSummary, StaleFileCleanup};
pub use config::{CleanupTarget, HookConfig};
pub use docs::{DocEntry, DocumentationContext};
pub use error::{HookError, Result, RootError};
pub use input::HookInput;
pub use logs::LogPruneStats;
pub use root::{find_project_root, GitProbe, ResolvedRoot, RootResolver, RootStrategy};
pub use storage::StorageConfig;

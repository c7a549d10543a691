//! Project root resolution with layered fallback.
//!
//! Every hook needs the project root to find its configuration, documentation
//! and log directory. Hooks are installed at `<root>/.claude/hooks/<hook>`, so
//! the directory holding the running executable (the *anchor*) is the starting
//! point for every strategy.
//!
//! ## Strategies (first success wins)
//!
//! ```text
//! 0. Environment     $CLAUDE_PROJECT_DIR names an existing directory (opt-in)
//! 1. GitTopLevel     `git rev-parse --show-toplevel` run from the anchor
//! 2. MarkerWalk      nearest ancestor of the anchor containing `.git`
//! 3. ScriptLocation  the anchor's grandparent, if it exists
//! ```
//!
//! Strategy failures are soft: a missing git binary, a non-zero exit or a
//! timeout only move resolution on to the next step. Exhausting all of them
//! is the only hard error.

use fs_err as fs;
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

use crate::error::RootError;

/// Environment variable the host runtime exports with the project directory.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Version-control metadata entry looked for during the upward walk.
pub const VCS_MARKER: &str = ".git";

/// Levels above the anchor used by the last-resort fallback.
/// `.claude/hooks/` -> `.claude/` -> project root.
pub const FALLBACK_LEVELS: usize = 2;

pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which strategy produced a resolved root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStrategy {
    Environment,
    GitTopLevel,
    MarkerWalk,
    ScriptLocation,
}

impl RootStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootStrategy::Environment => "environment",
            RootStrategy::GitTopLevel => "git rev-parse",
            RootStrategy::MarkerWalk => ".git detection",
            RootStrategy::ScriptLocation => "script location fallback",
        }
    }
}

impl fmt::Display for RootStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project root plus the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoot {
    pub path: PathBuf,
    pub strategy: RootStrategy,
}

/// Runs the VCS "show top-level directory" command with a bounded timeout.
#[derive(Debug, Clone)]
pub struct GitProbe {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl Default for GitProbe {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_TIMEOUT)
    }
}

impl GitProbe {
    pub fn new(timeout: Duration) -> Self {
        Self::with_command("git", ["rev-parse", "--show-toplevel"], timeout)
    }

    /// Probe that runs an arbitrary program instead of git.
    /// Its first line of stdout is treated as the top-level path.
    pub fn with_command<P, I, A>(program: P, args: I, timeout: Duration) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// Returns the top-level directory reported from `cwd`, or `None` on any failure.
    pub fn top_level(&self, cwd: &Path) -> Option<PathBuf> {
        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                tracing::debug!(error = %err, program = ?self.program, "Git method failed to spawn");
                return None;
            }
        };

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                tracing::debug!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Git method timed out, killing"
                );
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(err) => {
                tracing::debug!(error = %err, "Git method failed while waiting");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        };

        if !status.success() {
            tracing::debug!(exit_code = ?status.code(), "Git method exited non-zero");
            return None;
        }

        let mut stdout = String::new();
        child.stdout.take()?.read_to_string(&mut stdout).ok()?;
        let line = stdout.lines().next().map(str::trim).unwrap_or_default();
        if line.is_empty() {
            return None;
        }
        Some(PathBuf::from(line))
    }
}

/// Layered project-root resolver.
///
/// Resolution is computed on demand and never cached; callers resolve once
/// per process and pass the result along.
#[derive(Debug, Clone)]
pub struct RootResolver {
    anchor: PathBuf,
    git: Option<GitProbe>,
    env_override: Option<String>,
}

impl RootResolver {
    /// Resolver anchored at `anchor` with the git probe enabled and no
    /// environment override.
    pub fn new(anchor: impl Into<PathBuf>) -> Self {
        let anchor = anchor.into();
        let anchor = if anchor.is_absolute() {
            anchor
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(&anchor))
                .unwrap_or(anchor)
        };

        Self {
            anchor,
            git: Some(GitProbe::default()),
            env_override: None,
        }
    }

    /// Resolver anchored at the directory holding the running executable.
    pub fn from_current_exe() -> Result<Self, RootError> {
        let exe = env::current_exe().map_err(RootError::AnchorUnavailable)?;
        let anchor = exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            RootError::AnchorUnavailable(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "executable has no parent directory",
            ))
        })?;
        Ok(Self::new(anchor))
    }

    /// Replaces (or with `None`, disables) the git probe.
    pub fn with_git(mut self, probe: Option<GitProbe>) -> Self {
        self.git = probe;
        self
    }

    /// Honors `var` as an explicit root before any other strategy.
    pub fn with_env_override(mut self, var: impl Into<String>) -> Self {
        self.env_override = Some(var.into());
        self
    }

    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    pub fn resolve(&self) -> Result<ResolvedRoot, RootError> {
        let found = self
            .from_env()
            .map(|path| (path, RootStrategy::Environment))
            .or_else(|| self.from_git().map(|p| (p, RootStrategy::GitTopLevel)))
            .or_else(|| self.walk_for_marker().map(|p| (p, RootStrategy::MarkerWalk)))
            .or_else(|| {
                self.script_location()
                    .map(|p| (p, RootStrategy::ScriptLocation))
            });

        match found {
            Some((path, strategy)) => {
                if strategy == RootStrategy::ScriptLocation {
                    tracing::warn!(path = %path.display(), "PROJECT_ROOT: using {}", strategy);
                } else {
                    tracing::info!(path = %path.display(), "PROJECT_ROOT: found via {}", strategy);
                }
                Ok(ResolvedRoot { path, strategy })
            }
            None => {
                tracing::error!(anchor = %self.anchor.display(), "Could not determine project root");
                Err(RootError::NotDetermined {
                    anchor: self.anchor.clone(),
                })
            }
        }
    }

    fn from_env(&self) -> Option<PathBuf> {
        let var = self.env_override.as_deref()?;
        let value = env::var_os(var).filter(|v| !v.is_empty())?;
        let path = PathBuf::from(value);
        if path.is_dir() {
            Some(path)
        } else {
            tracing::debug!(var, path = %path.display(), "Root override is not a directory");
            None
        }
    }

    fn from_git(&self) -> Option<PathBuf> {
        let root = self.git.as_ref()?.top_level(&self.anchor)?;
        root.exists().then_some(root)
    }

    /// Nearest ancestor (the anchor included, the filesystem root excluded)
    /// containing the VCS marker.
    fn walk_for_marker(&self) -> Option<PathBuf> {
        let start = self.canonical_anchor();
        let mut current = start.as_path();
        while let Some(parent) = current.parent() {
            if current.join(VCS_MARKER).exists() {
                return Some(current.to_path_buf());
            }
            current = parent;
        }
        None
    }

    fn script_location(&self) -> Option<PathBuf> {
        let mut candidate = self.canonical_anchor();
        for _ in 0..FALLBACK_LEVELS {
            candidate = candidate.parent()?.to_path_buf();
        }
        candidate.exists().then_some(candidate)
    }

    fn canonical_anchor(&self) -> PathBuf {
        fs::canonicalize(&self.anchor).unwrap_or_else(|_| self.anchor.clone())
    }
}

/// Resolves the root for the running hook, honoring `CLAUDE_PROJECT_DIR`.
pub fn find_project_root(git_timeout: Duration) -> Result<ResolvedRoot, RootError> {
    RootResolver::from_current_exe()?
        .with_git(Some(GitProbe::new(git_timeout)))
        .with_env_override(PROJECT_DIR_ENV)
        .resolve()
}

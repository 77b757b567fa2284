//! Error types for magify-core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Role;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// The validation pass a failure was recorded in. Passes run in this order
/// and a failing pass stops the ones after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPass {
    Existence,
    Repository,
    Content,
}

impl fmt::Display for ValidationPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationPass::Existence => "existence",
            ValidationPass::Repository => "repository",
            ValidationPass::Content => "content",
        };
        f.write_str(s)
    }
}

/// One failed precondition on a root directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("directory with {role} does not exist (path: '{path}')")]
    MissingRoot { role: Role, path: PathBuf },

    #[error("directory with {role} is not a Git repository (missing '{path}')")]
    NotARepository { role: Role, path: PathBuf },

    #[error("{role} directory lacks file '{name}' (expected at '{path}')")]
    MissingFile {
        role: Role,
        name: &'static str,
        path: PathBuf,
    },

    #[error("{role} directory lacks '{name}' subdirectory (expected at '{path}')")]
    MissingDirectory {
        role: Role,
        name: &'static str,
        path: PathBuf,
    },
}

/// Every failure of the first validation pass that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pass} check failed for {} item(s): {}", .failures.len(), join_failures(.failures))]
pub struct ValidationError {
    pub pass: ValidationPass,
    pub failures: Vec<CheckFailure>,
}

fn join_failures(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Version resolution
// ---------------------------------------------------------------------------

/// Errors while deriving a version label from the scripts repository.
#[derive(Debug, Error)]
pub enum VersionError {
    /// `git` could not be started at all.
    #[error("failed to run git in {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git` ran but exited unsuccessfully.
    #[error("git log failed in {path}: {stderr}")]
    GitFailed { path: PathBuf, stderr: String },

    /// `git` output was not an ISO-8601 date-time with offset.
    #[error("unexpected commit date from git: {raw:?}")]
    Malformed { raw: String },
}

//! Error types for magify-sync.

use std::path::PathBuf;

use thiserror::Error;

use magify_core::{ValidationError, VersionError};

/// All errors that can abort a run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A root directory failed precondition checks.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The scripts version label could not be resolved.
    #[error("version resolution failed: {0}")]
    Version(#[from] VersionError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Convert a directory-walk failure into [`SyncError::Io`], keeping the path
/// the walker was visiting.
pub(crate) fn walk_err(root: &std::path::Path, err: walkdir::Error) -> SyncError {
    let path = err
        .path()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    io_err(path, source)
}

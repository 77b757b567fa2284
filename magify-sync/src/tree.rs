//! Recursive copy and staged replacement of filesystem entries.
//!
//! ## `replace_entry` — staged protocol
//!
//! 1. Remove any `<dest>.magify.tmp` left behind by an interrupted run.
//! 2. Copy the source (file or whole tree, minus excluded top-level names)
//!    to `<dest>.magify.tmp`.
//! 3. Remove the existing destination, whatever its kind.
//! 4. Rename the staged copy to the destination.
//!
//! A failure in step 2 removes the staged copy and leaves the destination
//! untouched. Failures after that are not rolled back.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use magify_core::layout::STAGING_SUFFIX;
use walkdir::WalkDir;

use crate::error::{io_err, walk_err, SyncError};

/// `<dest>.magify.tmp`, the sibling a replacement is built in.
pub fn staging_path(dest: &Path) -> PathBuf {
    let mut name: OsString = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    dest.with_file_name(name)
}

/// Whether anything (file, directory or dangling symlink) exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever is at `path`. Directories are removed recursively;
/// symlinks are removed, never followed.
///
/// Returns `false` when nothing was there.
pub fn remove_entry(path: &Path) -> Result<bool, SyncError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(io_err(path, e)),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| io_err(path, e))?;
    } else {
        fs::remove_file(path).map_err(|e| io_err(path, e))?;
    }
    Ok(true)
}

/// Copy `src` to `dest`, recursing when `src` is a directory.
///
/// Symlinks in the source are followed so the destination holds real
/// content. `dest` must not exist yet. `exclude` names direct children of a
/// directory `src` that are not copied.
pub fn copy_entry(src: &Path, dest: &Path, exclude: &[&str]) -> Result<(), SyncError> {
    let meta = fs::metadata(src).map_err(|e| io_err(src, e))?;
    if meta.is_dir() {
        copy_tree(src, dest, exclude)
    } else {
        fs::copy(src, dest).map_err(|e| io_err(dest, e))?;
        Ok(())
    }
}

/// Recursively copy the directory `src` to `dest`, preserving structure and
/// file contents. Empty directories are recreated. Direct children of `src`
/// named in `exclude` are skipped along with everything below them.
pub fn copy_tree(src: &Path, dest: &Path, exclude: &[&str]) -> Result<(), SyncError> {
    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && is_excluded(e.file_name(), exclude)));
    for entry in walker {
        let entry = entry.map_err(|e| walk_err(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io_err(entry.path(), std::io::Error::other(e)))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| io_err(&target, e))?;
        }
    }
    tracing::debug!("copied {} -> {}", src.display(), dest.display());
    Ok(())
}

fn is_excluded(name: &OsStr, exclude: &[&str]) -> bool {
    exclude.iter().any(|x| name == OsStr::new(x))
}

/// Replace `dest` with a fresh copy of `src` via a staging sibling.
///
/// Returns `true` when something existed at `dest` before.
pub fn replace_entry(src: &Path, dest: &Path, exclude: &[&str]) -> Result<bool, SyncError> {
    let staging = staging_path(dest);
    if remove_entry(&staging)? {
        tracing::warn!("removed leftover staging path {}", staging.display());
    }

    if let Err(e) = copy_entry(src, &staging, exclude) {
        if let Err(cleanup) = remove_entry(&staging) {
            tracing::warn!("failed to remove staging path {}: {cleanup}", staging.display());
        }
        return Err(e);
    }

    let existed = remove_entry(dest)?;
    fs::rename(&staging, dest).map_err(|e| io_err(dest, e))?;
    Ok(existed)
}

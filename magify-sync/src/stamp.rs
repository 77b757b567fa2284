//! Version manifest at the top of the templates root.
//!
//! Writes use the same atomic `.tmp` + rename pattern as the tree replacer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use magify_core::{layout, VersionLabel};

use crate::error::{io_err, SyncError};

/// `<templates>/scripts_version.txt`
pub fn manifest_path(templates: &Path) -> PathBuf {
    templates.join(layout::MANIFEST_FILE)
}

/// Manifest body: the fixed header line, then the label on its own line.
pub fn manifest_contents(label: &VersionLabel) -> String {
    format!("{}\n{}\n", layout::MANIFEST_HEADER, label)
}

/// Create or overwrite the manifest for `label`. Returns the manifest path.
pub fn write_manifest(templates: &Path, label: &VersionLabel) -> Result<PathBuf, SyncError> {
    let path = manifest_path(templates);
    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, manifest_contents(label)).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, &path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::warn!("failed to remove {}: {cleanup}", tmp.display());
        }
        return Err(io_err(&path, e));
    }
    tracing::debug!("wrote: {}", path.display());
    Ok(path)
}

/// Label recorded by the previous run, if a manifest is present.
///
/// Informational only: a missing, unreadable or label-less manifest yields
/// `None`. Non-UTF-8 bytes are decoded lossily.
pub fn read_manifest_label(templates: &Path) -> Option<VersionLabel> {
    let path = manifest_path(templates);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("cannot read previous manifest {}: {e}", path.display());
            return None;
        }
    };
    String::from_utf8_lossy(&bytes)
        .lines()
        .nth(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(VersionLabel::from)
}

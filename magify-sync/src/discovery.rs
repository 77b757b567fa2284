//! Template discovery under the templates root.
//!
//! [`discover`] opens a single directory listing and returns a lazy iterator
//! over it. Entries are filtered in order:
//!
//! 1. names on the ignore list (`.git`, `.gitignore`, `README.md`) are dropped;
//! 2. non-directories are dropped with a debug line;
//! 3. directories without `mission.sqm` are dropped with a warning.
//!
//! Anything left is a [`Template`]. Order is whatever the filesystem returns.

use std::ffi::OsStr;
use std::fs::{self, DirEntry, ReadDir};
use std::path::{Path, PathBuf};

use magify_core::{layout, Template, TemplateName};

use crate::error::{io_err, SyncError};

/// Lazy, single-pass sequence of templates. Yields an error item if the
/// directory listing itself fails part-way.
#[derive(Debug)]
pub struct Templates {
    root: PathBuf,
    entries: ReadDir,
}

/// Start enumerating templates under `root`.
pub fn discover(root: &Path) -> Result<Templates, SyncError> {
    let entries = fs::read_dir(root).map_err(|e| io_err(root, e))?;
    Ok(Templates {
        root: root.to_path_buf(),
        entries,
    })
}

impl Iterator for Templates {
    type Item = Result<Template, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(io_err(&self.root, e))),
            };
            if let Some(template) = classify(&entry) {
                return Some(Ok(template));
            }
        }
    }
}

/// Whether a top-level name under the templates root is never a template.
pub fn is_ignored(name: &OsStr) -> bool {
    layout::IGNORED_TEMPLATE_NAMES
        .iter()
        .any(|ignored| name == OsStr::new(ignored))
}

fn classify(entry: &DirEntry) -> Option<Template> {
    let file_name = entry.file_name();
    if is_ignored(&file_name) {
        return None;
    }

    let path = entry.path();
    if !path.is_dir() {
        tracing::debug!("Skipping file '{}'.", path.display());
        return None;
    }

    let name = TemplateName::from(file_name.to_string_lossy().into_owned());
    if !path.join(layout::MISSION_MARKER).is_file() {
        tracing::warn!(
            "Template directory '{}' lacks file '{}'. Skipping.",
            name,
            layout::MISSION_MARKER
        );
        return None;
    }

    tracing::debug!("Found a valid template directory: '{name}'.");
    Some(Template { name, path })
}

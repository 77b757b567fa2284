//! Synchronization of a single template.
//!
//! ## `sync_template` — 2-phase protocol
//!
//! 1. Replace `<template>/Scripts` with a full copy of the scripts root. Any
//!    previous content is removed first, so scripts deleted upstream do not
//!    survive. The repository's own `.git/` is not part of the copy.
//! 2. For each top-level entry of the base root except `.git`, replace the
//!    same-named template entry with a copy of it (overlay, never merge).
//!
//! Template entries that have no counterpart in the base root are left alone.
//! Every replacement goes through [`tree::replace_entry`]; an I/O error aborts
//! immediately and the template may be left partially updated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use magify_core::{layout, Roots, Template, TemplateName};

use crate::error::{io_err, SyncError};
use crate::tree;

// ---------------------------------------------------------------------------
// Entry result
// ---------------------------------------------------------------------------

/// Outcome for one replaced destination entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntryResult {
    /// An existing entry was removed and replaced with a fresh copy.
    Replaced { path: PathBuf },
    /// Nothing existed at the destination; a copy was created.
    Created { path: PathBuf },
    /// `--dry-run` mode: the entry *would* have been replaced.
    WouldReplace { path: PathBuf },
    /// `--dry-run` mode: the entry *would* have been created.
    WouldCreate { path: PathBuf },
}

impl EntryResult {
    pub fn path(&self) -> &Path {
        match self {
            EntryResult::Replaced { path }
            | EntryResult::Created { path }
            | EntryResult::WouldReplace { path }
            | EntryResult::WouldCreate { path } => path,
        }
    }
}

/// Outcome of syncing a single template.
#[derive(Debug, Clone, Serialize)]
pub struct SyncTemplateResult {
    pub template: TemplateName,
    pub path: PathBuf,
    /// The scripts subtree first, then base entries in name order.
    pub entries: Vec<EntryResult>,
}

// ---------------------------------------------------------------------------
// sync_template
// ---------------------------------------------------------------------------

/// Bring `template` up to date with the scripts and base roots.
///
/// Afterwards `Scripts/` matches the scripts root byte for byte, except that
/// the repository's own top-level `.git/` is never copied.
pub fn sync_template(
    template: &Template,
    roots: &Roots,
    dry_run: bool,
) -> Result<SyncTemplateResult, SyncError> {
    let mut entries = Vec::new();

    // Phase 1: the scripts subtree.
    entries.push(sync_entry(
        &roots.scripts,
        &template.scripts_dir(),
        &[layout::VCS_DIR],
        dry_run,
    )?);

    // Phase 2: overlay base entries.
    for source in base_entries(&roots.base)? {
        let Some(name) = source.file_name() else {
            continue;
        };
        let dest = template.path.join(name);
        entries.push(sync_entry(&source, &dest, &[], dry_run)?);
    }

    Ok(SyncTemplateResult {
        template: template.name.clone(),
        path: template.path.clone(),
        entries,
    })
}

fn sync_entry(
    source: &Path,
    dest: &Path,
    exclude: &[&str],
    dry_run: bool,
) -> Result<EntryResult, SyncError> {
    let path = dest.to_path_buf();
    if dry_run {
        let result = if tree::entry_exists(dest) {
            EntryResult::WouldReplace { path }
        } else {
            EntryResult::WouldCreate { path }
        };
        tracing::info!("[dry-run] would copy {} -> {}", source.display(), dest.display());
        return Ok(result);
    }

    let existed = tree::replace_entry(source, dest, exclude)?;
    tracing::debug!(
        "{}: {}",
        if existed { "replaced" } else { "created" },
        dest.display()
    );
    Ok(if existed {
        EntryResult::Replaced { path }
    } else {
        EntryResult::Created { path }
    })
}

/// Top-level entries of the base root, sorted by name, without VCS metadata.
fn base_entries(base: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let mut entries = fs::read_dir(base)
        .map_err(|e| io_err(base, e))?
        .filter(|entry| {
            entry
                .as_ref()
                .map(|e| e.file_name() != layout::VCS_DIR)
                .unwrap_or(true)
        })
        .map(|entry| entry.map(|e| e.path()).map_err(|e| io_err(base, e)))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

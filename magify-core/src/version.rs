//! Scripts version label resolution.
//!
//! A run is labelled either with a manual string, used verbatim, or with the
//! calendar date of the latest commit in the scripts repository. The commit
//! date is read through a [`RevisionSource`]; [`GitCli`] shells out to `git`.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, FixedOffset};

use crate::error::VersionError;
use crate::types::VersionLabel;

/// Format of a derived label: the date part of an ISO-8601 timestamp.
const LABEL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the most recent commit timestamp of a repository.
pub trait RevisionSource {
    /// Raw committer date of the latest revision in `repo`, as printed by the
    /// VCS (ISO-8601 with offset, possibly quoted).
    fn latest_commit_date(&self, repo: &Path) -> Result<String, VersionError>;
}

/// [`RevisionSource`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl RevisionSource for GitCli {
    fn latest_commit_date(&self, repo: &Path) -> Result<String, VersionError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(repo)
            .args(["log", "-1", "--format=%cI"])
            .output()
            .map_err(|source| VersionError::Spawn {
                path: repo.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(VersionError::GitFailed {
                path: repo.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Resolve the label for a run.
///
/// A `manual` label short-circuits: it is not validated and the repository
/// is never queried.
pub fn resolve(
    manual: Option<&str>,
    scripts: &Path,
    source: &dyn RevisionSource,
) -> Result<VersionLabel, VersionError> {
    if let Some(label) = manual {
        return Ok(VersionLabel::from(label));
    }
    let raw = source.latest_commit_date(scripts)?;
    parse_commit_date(&raw)
}

/// Turn raw VCS output into a `YYYY-MM-DD` label.
///
/// Surrounding whitespace and one pair of double quotes are stripped; the rest
/// must be a complete RFC 3339 date-time. The date is taken in the commit's
/// own offset, matching the first ten characters of the timestamp.
pub fn parse_commit_date(raw: &str) -> Result<VersionLabel, VersionError> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);

    let timestamp: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(unquoted)
        .map_err(|_| VersionError::Malformed {
            raw: raw.to_string(),
        })?;

    Ok(VersionLabel::from(
        timestamp.format(LABEL_DATE_FORMAT).to_string(),
    ))
}

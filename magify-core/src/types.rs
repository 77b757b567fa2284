//! Domain types for magify.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The directory name of a template under the templates root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateName(pub String);

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifies which revision of the scripts root a run was built from.
///
/// Either a manual label taken verbatim or a `YYYY-MM-DD` commit date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionLabel(pub String);

impl VersionLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for VersionLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionLabel {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Roots
// ---------------------------------------------------------------------------

/// The part a root directory plays in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Templates,
    Scripts,
    Base,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Templates, Role::Scripts, Role::Base]
    }

    /// Whether the root must be a git repository.
    pub fn is_versioned(self) -> bool {
        matches!(self, Role::Templates | Role::Scripts)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Templates => "templates",
            Role::Scripts => "scripts",
            Role::Base => "base files",
        };
        f.write_str(s)
    }
}

/// The three directories a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roots {
    /// Git repository holding one directory per template.
    pub templates: PathBuf,
    /// Git repository with the shared scripts; never written.
    pub scripts: PathBuf,
    /// Plain directory with assets overlaid into every template; never written.
    pub base: PathBuf,
}

impl Roots {
    pub fn new(
        templates: impl Into<PathBuf>,
        scripts: impl Into<PathBuf>,
        base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates: templates.into(),
            scripts: scripts.into(),
            base: base.into(),
        }
    }

    pub fn path(&self, role: Role) -> &Path {
        match role {
            Role::Templates => &self.templates,
            Role::Scripts => &self.scripts,
            Role::Base => &self.base,
        }
    }

    /// `<templates>/scripts_version.txt` — pure, no I/O.
    pub fn manifest_path(&self) -> PathBuf {
        self.templates.join(layout::MANIFEST_FILE)
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A directory under the templates root that carries a `mission.sqm` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: TemplateName,
    pub path: PathBuf,
}

impl Template {
    /// `<template>/Scripts` — pure, no I/O.
    pub fn scripts_dir(&self) -> PathBuf {
        self.path.join(layout::SCRIPTS_SUBDIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_names_match_log_wording() {
        assert_eq!(Role::Templates.to_string(), "templates");
        assert_eq!(Role::Scripts.to_string(), "scripts");
        assert_eq!(Role::Base.to_string(), "base files");
    }

    #[test]
    fn only_templates_and_scripts_are_versioned() {
        let versioned: Vec<_> = Role::all().iter().filter(|r| r.is_versioned()).collect();
        assert_eq!(versioned, vec![&Role::Templates, &Role::Scripts]);
    }

    #[test]
    fn derived_paths_are_joined_under_their_roots() {
        let roots = Roots::new("/t", "/s", "/b");
        assert_eq!(roots.manifest_path(), PathBuf::from("/t/scripts_version.txt"));
        assert_eq!(roots.path(Role::Base), Path::new("/b"));

        let template = Template {
            name: TemplateName::from("Desert"),
            path: PathBuf::from("/t/Desert"),
        };
        assert_eq!(template.scripts_dir(), PathBuf::from("/t/Desert/Scripts"));
    }
}

//! Precondition checks on the three roots.
//!
//! Validation runs as three complete passes:
//!
//! 1. **existence** — every root is an existing directory;
//! 2. **repository** — the templates and scripts roots contain `.git/`;
//! 3. **content** — the scripts and base roots contain their marker entries.
//!
//! Each pass records every failure it finds. A pass with failures stops
//! validation so later passes never report on directories that are not there.

use std::path::Path;

use crate::error::{CheckFailure, ValidationError, ValidationPass};
use crate::layout;
use crate::types::{Role, Roots};

/// Run all validation passes over `roots`. Read-only.
pub fn validate(roots: &Roots) -> Result<(), ValidationError> {
    ensure_pass(ValidationPass::Existence, check_existence(roots))?;
    ensure_pass(ValidationPass::Repository, check_repositories(roots))?;
    ensure_pass(ValidationPass::Content, check_content(roots))?;
    Ok(())
}

fn ensure_pass(pass: ValidationPass, failures: Vec<CheckFailure>) -> Result<(), ValidationError> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { pass, failures })
    }
}

/// Pass 1: each root exists and is a directory.
pub fn check_existence(roots: &Roots) -> Vec<CheckFailure> {
    Role::all()
        .iter()
        .filter(|role| !roots.path(**role).is_dir())
        .map(|role| CheckFailure::MissingRoot {
            role: *role,
            path: roots.path(*role).to_path_buf(),
        })
        .collect()
}

/// Pass 2: versioned roots contain a VCS metadata directory.
pub fn check_repositories(roots: &Roots) -> Vec<CheckFailure> {
    Role::all()
        .iter()
        .filter(|role| role.is_versioned())
        .filter_map(|role| {
            let vcs = roots.path(*role).join(layout::VCS_DIR);
            (!vcs.is_dir()).then_some(CheckFailure::NotARepository {
                role: *role,
                path: vcs,
            })
        })
        .collect()
}

/// Pass 3: marker files and subdirectories of the base and scripts roots.
pub fn check_content(roots: &Roots) -> Vec<CheckFailure> {
    let mut failures = Vec::new();
    require_dir(&mut failures, Role::Base, &roots.base, layout::BASE_TEXTURES_DIR);
    require_file(&mut failures, Role::Base, &roots.base, layout::BASE_DESCRIPTION_FILE);
    require_file(&mut failures, Role::Scripts, &roots.scripts, layout::SCRIPTS_CONFIG_FILE);
    require_dir(&mut failures, Role::Scripts, &roots.scripts, layout::SCRIPTS_ARMORY_DIR);
    failures
}

fn require_file(failures: &mut Vec<CheckFailure>, role: Role, root: &Path, name: &'static str) {
    let path = root.join(name);
    if !path.is_file() {
        failures.push(CheckFailure::MissingFile { role, name, path });
    }
}

fn require_dir(failures: &mut Vec<CheckFailure>, role: Role, root: &Path, name: &'static str) {
    let path = root.join(name);
    if !path.is_dir() {
        failures.push(CheckFailure::MissingDirectory { role, name, path });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn valid_roots(tmp: &TempDir) -> Roots {
        let roots = Roots::new(
            tmp.path().join("templates"),
            tmp.path().join("scripts"),
            tmp.path().join("base"),
        );
        fs::create_dir_all(roots.templates.join(".git")).unwrap();
        fs::create_dir_all(roots.scripts.join(".git")).unwrap();
        fs::create_dir_all(roots.scripts.join("Armory")).unwrap();
        fs::write(roots.scripts.join("config.cpp"), "class CfgPatches {};").unwrap();
        fs::create_dir_all(roots.base.join("Textures")).unwrap();
        fs::write(roots.base.join("description.ext"), "author = \"x\";").unwrap();
        roots
    }

    #[test]
    fn valid_layout_passes() {
        let tmp = TempDir::new().unwrap();
        let roots = valid_roots(&tmp);
        assert_eq!(validate(&roots), Ok(()));
    }

    #[test]
    fn missing_roots_are_all_reported_in_existence_pass() {
        let tmp = TempDir::new().unwrap();
        let roots = Roots::new(
            tmp.path().join("nope_t"),
            tmp.path().join("nope_s"),
            tmp.path().join("nope_b"),
        );
        let err = validate(&roots).unwrap_err();
        assert_eq!(err.pass, ValidationPass::Existence);
        assert_eq!(err.failures.len(), 3);
    }

    #[test]
    fn plain_file_is_not_a_root_directory() {
        let tmp = TempDir::new().unwrap();
        let mut roots = valid_roots(&tmp);
        let file = tmp.path().join("base.txt");
        fs::write(&file, "not a dir").unwrap();
        roots.base = file.clone();

        let err = validate(&roots).unwrap_err();
        assert_eq!(
            err.failures,
            vec![CheckFailure::MissingRoot { role: Role::Base, path: file }]
        );
    }

    #[test]
    fn base_root_need_not_be_a_repository() {
        let tmp = TempDir::new().unwrap();
        let roots = valid_roots(&tmp);
        assert!(!roots.base.join(".git").exists());
        assert!(check_repositories(&roots).is_empty());
    }

    #[test]
    fn repository_pass_gates_content_pass() {
        let tmp = TempDir::new().unwrap();
        let roots = valid_roots(&tmp);
        fs::remove_dir_all(roots.scripts.join(".git")).unwrap();
        fs::remove_file(roots.base.join("description.ext")).unwrap();

        let err = validate(&roots).unwrap_err();
        assert_eq!(err.pass, ValidationPass::Repository);
        assert_eq!(
            err.failures,
            vec![CheckFailure::NotARepository {
                role: Role::Scripts,
                path: roots.scripts.join(".git"),
            }]
        );
    }

    #[test]
    fn content_pass_reports_every_missing_marker() {
        let tmp = TempDir::new().unwrap();
        let roots = valid_roots(&tmp);
        fs::remove_dir_all(roots.base.join("Textures")).unwrap();
        fs::remove_file(roots.base.join("description.ext")).unwrap();
        fs::remove_file(roots.scripts.join("config.cpp")).unwrap();
        fs::remove_dir_all(roots.scripts.join("Armory")).unwrap();

        let err = validate(&roots).unwrap_err();
        assert_eq!(err.pass, ValidationPass::Content);
        let paths: Vec<PathBuf> = err
            .failures
            .iter()
            .map(|f| match f {
                CheckFailure::MissingFile { path, .. } | CheckFailure::MissingDirectory { path, .. } => {
                    path.clone()
                }
                other => panic!("unexpected failure {other:?}"),
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                roots.base.join("Textures"),
                roots.base.join("description.ext"),
                roots.scripts.join("config.cpp"),
                roots.scripts.join("Armory"),
            ]
        );
    }

    #[test]
    fn marker_of_the_wrong_kind_fails() {
        let tmp = TempDir::new().unwrap();
        let roots = valid_roots(&tmp);
        fs::remove_dir_all(roots.scripts.join("Armory")).unwrap();
        fs::write(roots.scripts.join("Armory"), "file, not dir").unwrap();

        let failures = check_content(&roots);
        assert!(matches!(
            failures.as_slice(),
            [CheckFailure::MissingDirectory { role: Role::Scripts, name: "Armory", .. }]
        ));
    }
}

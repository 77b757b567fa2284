//! Run pipeline: validate → resolve version → sync each template → stamp.
//!
//! This is the one entrypoint the CLI uses. Each stage runs to completion
//! before the next; any error ends the run with nothing rolled back.

use std::path::PathBuf;

use serde::Serialize;

use magify_core::{
    validate,
    version::{self, RevisionSource},
    Roots, VersionLabel,
};

use crate::discovery;
use crate::stamp;
use crate::template::{sync_template, SyncTemplateResult};
use crate::SyncError;

/// Everything a run needs, taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub roots: Roots,
    /// Label to use verbatim instead of asking git.
    pub manual_version: Option<String>,
    pub dry_run: bool,
}

/// What happened to the version manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ManifestOutcome {
    Written { path: PathBuf },
    WouldWrite { path: PathBuf },
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub version: VersionLabel,
    /// Label found in the manifest before this run, if any.
    pub previous_version: Option<VersionLabel>,
    pub templates: Vec<SyncTemplateResult>,
    pub manifest: ManifestOutcome,
}

/// Run the whole pipeline.
///
/// `on_template` is called right after each template finishes so callers can
/// report progress before later templates are touched.
pub fn run(
    options: &RunOptions,
    revisions: &dyn RevisionSource,
    mut on_template: impl FnMut(&SyncTemplateResult),
) -> Result<RunReport, SyncError> {
    let roots = &options.roots;
    validate(roots)?;

    // Resolved once, before any template is touched.
    let label = version::resolve(options.manual_version.as_deref(), &roots.scripts, revisions)?;
    tracing::debug!("scripts version: {label}");

    let previous_version = stamp::read_manifest_label(&roots.templates);
    if let Some(previous) = previous_version.as_ref().filter(|p| **p != label) {
        tracing::info!("scripts version changes from {previous} to {label}");
    }

    let mut templates = Vec::new();
    for template in discovery::discover(&roots.templates)? {
        let template = template?;
        let result = sync_template(&template, roots, options.dry_run)?;
        on_template(&result);
        templates.push(result);
    }

    let manifest = if options.dry_run {
        let path = stamp::manifest_path(&roots.templates);
        tracing::info!("[dry-run] would write: {}", path.display());
        ManifestOutcome::WouldWrite { path }
    } else {
        ManifestOutcome::Written {
            path: stamp::write_manifest(&roots.templates, &label)?,
        }
    };

    Ok(RunReport {
        version: label,
        previous_version,
        templates,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use magify_core::{ValidationPass, VersionError};
    use tempfile::TempDir;

    use super::*;

    struct Never;

    impl RevisionSource for Never {
        fn latest_commit_date(&self, _repo: &Path) -> Result<String, VersionError> {
            panic!("revision source must not be queried");
        }
    }

    struct Malformed;

    impl RevisionSource for Malformed {
        fn latest_commit_date(&self, _repo: &Path) -> Result<String, VersionError> {
            Ok("\"2024-07\"".to_string())
        }
    }

    fn roots(tmp: &TempDir) -> Roots {
        let roots = Roots::new(
            tmp.path().join("templates"),
            tmp.path().join("scripts"),
            tmp.path().join("base"),
        );
        fs::create_dir_all(roots.templates.join(".git")).unwrap();
        fs::create_dir_all(roots.templates.join("Desert")).unwrap();
        fs::write(roots.templates.join("Desert/mission.sqm"), "version=54;").unwrap();
        fs::create_dir_all(roots.scripts.join(".git")).unwrap();
        fs::create_dir_all(roots.scripts.join("Armory")).unwrap();
        fs::write(roots.scripts.join("config.cpp"), "class CfgPatches {};").unwrap();
        fs::create_dir_all(roots.base.join("Textures")).unwrap();
        fs::write(roots.base.join("description.ext"), "").unwrap();
        roots
    }

    fn options(roots: Roots, manual: Option<&str>, dry_run: bool) -> RunOptions {
        RunOptions {
            roots,
            manual_version: manual.map(str::to_string),
            dry_run,
        }
    }

    #[test]
    fn manual_run_stamps_manifest_and_reports_each_template() {
        let tmp = TempDir::new().unwrap();
        let opts = options(roots(&tmp), Some("2024-01-01"), false);

        let mut seen = Vec::new();
        let report = run(&opts, &Never, |r| seen.push(r.template.0.clone())).unwrap();

        assert_eq!(seen, vec!["Desert"]);
        assert_eq!(report.version.as_str(), "2024-01-01");
        assert_eq!(report.previous_version, None);
        assert_eq!(
            report.manifest,
            ManifestOutcome::Written {
                path: opts.roots.manifest_path()
            }
        );
    }

    #[test]
    fn previous_label_is_reported() {
        let tmp = TempDir::new().unwrap();
        let opts = options(roots(&tmp), Some("first"), false);
        run(&opts, &Never, |_| {}).unwrap();

        let opts = options(opts.roots, Some("second"), false);
        let report = run(&opts, &Never, |_| {}).unwrap();
        assert_eq!(report.previous_version, Some(VersionLabel::from("first")));
    }

    #[test]
    fn malformed_revision_aborts_before_templates() {
        let tmp = TempDir::new().unwrap();
        let opts = options(roots(&tmp), None, false);

        let err = run(&opts, &Malformed, |_| panic!("no template may be synced")).unwrap_err();
        assert!(matches!(err, SyncError::Version(VersionError::Malformed { .. })));
        assert!(!opts.roots.templates.join("Desert/Scripts").exists());
        assert!(!opts.roots.manifest_path().exists());
    }

    #[test]
    fn validation_failure_aborts_before_version() {
        let tmp = TempDir::new().unwrap();
        let opts = options(roots(&tmp), None, false);
        fs::remove_file(opts.roots.scripts.join("config.cpp")).unwrap();

        let err = run(&opts, &Never, |_| {}).unwrap_err();
        match err {
            SyncError::Validation(v) => assert_eq!(v.pass, ValidationPass::Content),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn dry_run_writes_no_manifest() {
        let tmp = TempDir::new().unwrap();
        let opts = options(roots(&tmp), Some("x"), true);

        let report = run(&opts, &Never, |_| {}).unwrap();
        assert!(matches!(report.manifest, ManifestOutcome::WouldWrite { .. }));
        assert!(!opts.roots.manifest_path().exists());
    }
}

//! `magify` run — validate roots, sync every template, stamp the version.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use magify_core::{GitCli, Roots};
use magify_sync::{
    pipeline::{self, RunOptions},
    EntryResult, ManifestOutcome, RunReport, SyncError, SyncTemplateResult,
};

use crate::logging;

/// Arguments for a magify run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the Git repository with map templates.
    #[arg(short = 't', long, value_name = "TEMPLATES_PATH")]
    pub templates: PathBuf,

    /// Path to the Git repository containing scripts.
    #[arg(short = 's', long, value_name = "SCRIPTS_PATH")]
    pub scripts: PathBuf,

    /// Path to the directory with base files (textures, etc.).
    #[arg(short = 'b', long, value_name = "BASE_PATH")]
    pub base: PathBuf,

    /// Scripts version label to stamp instead of the latest commit date.
    #[arg(short = 'v', long, value_name = "LABEL")]
    pub scripts_version: Option<String>,

    /// Display debug output.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Show what would be replaced without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON instead of per-template lines.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            roots: Roots::new(&self.templates, &self.scripts, &self.base),
            manual_version: self.scripts_version.clone(),
            dry_run: self.dry_run,
        }
    }

    pub fn run(self) -> Result<()> {
        if !self.json {
            println!("magify {}\n", env!("CARGO_PKG_VERSION"));
        }
        logging::init(self.debug);

        let options = self.options();
        let json = self.json;
        let dry_run = self.dry_run;

        let result = pipeline::run(&options, &GitCli, |r| {
            if !json {
                print_template(r, dry_run);
            }
        });

        let report = match result {
            Ok(report) => report,
            Err(SyncError::Validation(err)) => {
                for failure in &err.failures {
                    tracing::error!("{failure}");
                }
                return Err(err).context("root directories are not usable");
            }
            Err(err) => return Err(err).context("template generation failed"),
        };

        if json {
            print_json(&report)?;
        } else {
            print_summary(&report);
        }
        Ok(())
    }
}

fn print_template(result: &SyncTemplateResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}{} Template '{}' built",
        "✓".green(),
        result.template
    );
    for entry in &result.entries {
        match entry {
            EntryResult::Replaced { path } => tracing::debug!("  ✎  {}", path.display()),
            EntryResult::Created { path } => tracing::debug!("  +  {}", path.display()),
            EntryResult::WouldReplace { .. } | EntryResult::WouldCreate { .. } => {
                println!("  ~  {}", entry.path().display())
            }
        }
    }
}

fn print_summary(report: &RunReport) {
    if report.templates.is_empty() {
        println!("No valid templates found.");
    }
    match &report.manifest {
        ManifestOutcome::Written { .. } => println!(
            "Templates were created with scripts version {}.",
            report.version.to_string().bold()
        ),
        ManifestOutcome::WouldWrite { path } => println!(
            "[dry-run] would stamp scripts version {} into {}",
            report.version.to_string().bold(),
            path.display()
        ),
    }
}

fn print_json(report: &RunReport) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(report).context("failed to serialize run report JSON")?
    );
    Ok(())
}

//! # magify-sync
//!
//! Template discovery, staged tree replacement and the run pipeline.
//!
//! Call [`pipeline::run`] to validate the roots, resolve the scripts version,
//! sync every template and stamp the manifest, or [`sync_template`] to bring
//! a single template up to date.

pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod stamp;
pub mod template;
pub mod tree;

pub use error::SyncError;
pub use pipeline::{ManifestOutcome, RunOptions, RunReport};
pub use template::{sync_template, EntryResult, SyncTemplateResult};

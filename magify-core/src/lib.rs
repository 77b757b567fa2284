//! magify core library — layout constants, domain types, root validation and
//! version resolution.
//!
//! - [`layout`] — every fixed file and directory name the tool relies on
//! - [`types`] — newtypes and the [`Roots`] triple
//! - [`validate`] — three-pass precondition checks on the roots
//! - [`version`] — scripts version label resolution

pub mod error;
pub mod layout;
pub mod types;
pub mod validate;
pub mod version;

pub use error::{CheckFailure, ValidationError, ValidationPass, VersionError};
pub use types::{Role, Roots, Template, TemplateName, VersionLabel};
pub use validate::validate;
pub use version::{GitCli, RevisionSource};

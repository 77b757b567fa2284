//! Fixed names inside the templates, scripts and base roots.

/// VCS metadata directory; its presence marks a git repository.
pub const VCS_DIR: &str = ".git";

/// VCS ignore file at the top of the templates repository.
pub const VCS_IGNORE_FILE: &str = ".gitignore";

/// Readme at the top of the templates repository.
pub const README_FILE: &str = "README.md";

/// Top-level names under the templates root that are never templates.
/// Matched exactly and case-sensitively.
pub const IGNORED_TEMPLATE_NAMES: [&str; 3] = [VCS_DIR, VCS_IGNORE_FILE, README_FILE];

/// Marker file every template directory must contain.
pub const MISSION_MARKER: &str = "mission.sqm";

/// Subdirectory of each template that receives a copy of the scripts root.
pub const SCRIPTS_SUBDIR: &str = "Scripts";

/// Required file in the scripts root.
pub const SCRIPTS_CONFIG_FILE: &str = "config.cpp";

/// Required subdirectory in the scripts root.
pub const SCRIPTS_ARMORY_DIR: &str = "Armory";

/// Required subdirectory in the base root.
pub const BASE_TEXTURES_DIR: &str = "Textures";

/// Required file in the base root.
pub const BASE_DESCRIPTION_FILE: &str = "description.ext";

/// Version manifest written at the top of the templates root.
pub const MANIFEST_FILE: &str = "scripts_version.txt";

/// First line of the version manifest.
pub const MANIFEST_HEADER: &str = "Templates were created with the following scripts version:";

/// Suffix of the sibling a replacement is staged in before being renamed
/// into place.
pub const STAGING_SUFFIX: &str = ".magify.tmp";

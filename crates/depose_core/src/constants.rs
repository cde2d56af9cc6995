//! Fixed names and literals shared by the collector, extractor and pruner.
//!
//! ## Exclusions
//!
//! Entries in [`EXCLUDED_NAMES`] are matched against the *file name* of every
//! walked path. A matching directory is skipped together with its whole
//! subtree; a matching file is simply not scanned.
//!
//! ## Reference markers
//!
//! Require-style references are found by splitting a line on
//! [`REQUIRE_MARKER`]. Fragments that start with [`LOCAL_PATH_MARKER`] point at
//! local files, not packages, and are never looked up.

/// Name of the manifest audited by default
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Name the original manifest is renamed to before the rewritten one takes its place
pub const BACKUP_FILE_NAME: &str = "oldpackage.json";

/// File and directory names that are never scanned
pub const EXCLUDED_NAMES: &[&str] = &[
    "node_modules",      // installed packages
    ".git",              // repository metadata
    ".gitignore",        // ignore rules
    ".env",              // environment secrets
    "package.json",      // the manifest itself
    "package-lock.json", // lockfile
    "README.md",         // docs
    "oldpackage.json",   // backup left by a previous run
    "depose",            // the tool's own binary
];

/// Call-style reference prefix: `require("`
pub const REQUIRE_MARKER: &str = "require(\"";

/// Suffix stripped from the fragment following [`REQUIRE_MARKER`]
pub const REQUIRE_SUFFIX: &str = "\");";

/// Leading character of a path-relative (local file) reference
pub const LOCAL_PATH_MARKER: char = '.';

/// Returns true when a walked path with this file name must be skipped
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_NAMES.contains(&name)
}

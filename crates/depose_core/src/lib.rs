//! Core engine for auditing a project's declared npm dependencies.
//!
//! This crate provides the pieces shared by depose checks:
//! - Reading `package.json` into declared and script-referenced names
//! - A concurrent usage table of declared dependencies
//! - Line-level extraction of `require("…")` and `import … from '…'` references
//! - Walking a project tree and scanning every file in parallel

mod collector;
mod constants;
mod extractor;
mod manifest;
mod scanner;
mod types;
mod usage;

// Re-export public API
pub use collector::collect_files;
pub use constants::{
    BACKUP_FILE_NAME, EXCLUDED_NAMES, LOCAL_PATH_MARKER, MANIFEST_FILE_NAME, REQUIRE_MARKER,
    REQUIRE_SUFFIX, is_excluded,
};
pub use extractor::{references_in_line, scan_line};
pub use manifest::{declared_dependencies, parse_manifest, read_manifest, script_references};
pub use scanner::{ScanSummary, scan_file, scan_files, scan_tree};
pub use types::{DeclaredDependencies, PackageManifest};
pub use usage::UsageTable;

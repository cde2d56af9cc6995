//! Unused dependency pruning for npm projects.
//!
//! This crate finds the dependencies declared in `package.json` that no file
//! in the project references and rewrites the manifest without them. The
//! original manifest is kept next to it as `oldpackage.json`.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use depose_prune::{Config, run_prune_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     manifest: None,
//!     dry_run: false,
//! };
//!
//! let result = run_prune_check(cfg.clone())?;
//!
//! if !result.removed.is_empty() {
//!     // Use buffered output for better performance
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     depose_prune::print_removed(&mut stdout, &result, cfg.dry_run)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod pruner;
mod reporter;
mod types;

// Re-export public API
pub use checker::run_prune_check;
pub use config::Config;
pub use pruner::{backup_path, filter_lines, prune_manifest, remove_trailing_commas};
pub use reporter::{print_nothing_to_remove, print_removed};
pub use types::{CheckResult, PruneOutcome};

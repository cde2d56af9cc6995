use std::{collections::BTreeSet, path::PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// Every name under `dependencies` and `devDependencies`
    pub declared: BTreeSet<String>,
    /// Declared names referenced from a script, never removed
    pub always_keep: BTreeSet<String>,
    /// Declared names with no reference anywhere in the scanned tree
    pub removed: BTreeSet<String>,
    pub files_scanned: usize,
    /// Where the original manifest was moved; None when nothing was rewritten
    pub backup: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    pub lines_removed: usize,
    pub backup: PathBuf,
}

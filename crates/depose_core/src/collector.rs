use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// Walks `root` and returns every file that should be scanned.
///
/// No ignore files are honoured and hidden entries are visited; the only
/// filter is `exclude`, matched against each entry's file name. An excluded
/// directory is pruned with its entire subtree while its siblings are still
/// walked. There is no extension filter: every remaining non-directory entry
/// is returned.
pub fn collect_files(root: &Path, exclude: &[&str]) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let excluded: HashSet<String> = exclude.iter().map(|name| name.to_string()).collect();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(move |dent| {
            let skip = dent.file_name().to_str().is_some_and(|name| excluded.contains(name));
            if skip {
                trace!("Skipping excluded path: {}", dent.path().display());
            }
            !skip
        })
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res.with_context(|| format!("Failed to walk {}", root.display()))?;
        if dent.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }
        trace!("Collected file: {}", dent.path().display());
        files.push(dent.into_path());
    }

    debug!("Collected {} files", files.len());
    Ok(files)
}

use anyhow::{Context, Result};
use depose_core::BACKUP_FILE_NAME;
use log::{debug, info, trace};
use regex::Regex;
use std::{
    borrow::Cow,
    collections::BTreeSet,
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tempfile::NamedTempFile;

use crate::types::PruneOutcome;

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*}").expect("trailing comma pattern is a valid regex"));

/// Rewrites `manifest` without the lines that mention any name in `removal`.
///
/// The pipeline is: filtered copy, trailing-comma repair, then swap. The
/// original is renamed to [`BACKUP_FILE_NAME`] next to it and the repaired
/// copy takes its place. Nothing is retried; on failure the presence of the
/// backup tells whether the original was already moved aside.
///
/// Removal is line-granular: a line is dropped when it contains a removed
/// name anywhere, so an unrelated line that happens to contain the name as a
/// substring (`"react"` inside `"react-router"`) is dropped too.
pub fn prune_manifest(manifest: &Path, removal: &BTreeSet<String>) -> Result<PruneOutcome> {
    info!("Pruning {} dependencies from {}", removal.len(), manifest.display());

    let file =
        File::open(manifest).with_context(|| format!("Failed to open {}", manifest.display()))?;
    let (filtered, lines_removed) = filter_lines(BufReader::new(file), removal)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let repaired = remove_trailing_commas(&filtered);

    let dir = match manifest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary manifest in {}", dir.display()))?;
    tmp.write_all(repaired.as_bytes())
        .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    let permissions = fs::metadata(manifest)
        .with_context(|| format!("Failed to stat {}", manifest.display()))?
        .permissions();
    fs::set_permissions(tmp.path(), permissions)
        .with_context(|| format!("Failed to set permissions on {}", tmp.path().display()))?;

    let backup = backup_path(manifest);
    fs::rename(manifest, &backup).with_context(|| {
        format!("Failed to move {} to {}", manifest.display(), backup.display())
    })?;
    debug!("Moved original manifest to {}", backup.display());
    tmp.persist(manifest)
        .with_context(|| format!("Failed to replace {}", manifest.display()))?;

    info!("Rewrote {} ({} lines removed)", manifest.display(), lines_removed);
    Ok(PruneOutcome { lines_removed, backup })
}

/// Copies `reader` line by line, dropping every line that contains a name
/// from `removal`. Kept lines are copied with their original terminators.
/// Returns the copy and the number of dropped lines.
pub fn filter_lines<R: BufRead>(
    mut reader: R,
    removal: &BTreeSet<String>,
) -> std::io::Result<(String, usize)> {
    let mut out = String::new();
    let mut line = String::new();
    let mut removed = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if let Some(name) = removal.iter().find(|name| !name.is_empty() && line.contains(*name)) {
            trace!("Dropping line for '{}': {}", name, line.trim_end());
            removed += 1;
            continue;
        }
        out.push_str(&line);
    }
    Ok((out, removed))
}

/// Replaces every `,` followed by optional whitespace and `}` with `}`.
/// Valid JSON has no such sequence outside strings, so this is a no-op on a
/// manifest that needed no repair.
pub fn remove_trailing_commas(content: &str) -> Cow<'_, str> {
    TRAILING_COMMA_RE.replace_all(content, "}")
}

pub fn backup_path(manifest: &Path) -> PathBuf {
    manifest.with_file_name(BACKUP_FILE_NAME)
}

use anyhow::{Context, Result};
use log::{debug, info, trace};
use rayon::prelude::*;
use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    thread,
};

use crate::{collector::collect_files, extractor::scan_line, usage::UsageTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_scanned: usize,
    /// Names extracted across all files, including undeclared ones
    pub references_found: usize,
}

/// Streams one file line by line through the extractor.
///
/// Lines are decoded lossily so binary and non-UTF-8 files are scanned
/// without error. A file that cannot be opened or read fails the scan.
pub fn scan_file(path: &Path, table: &UsageTable) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    debug!("Reading file: {}", path.display());

    let mut reader = BufReader::new(file);
    let mut buf: Vec<u8> = Vec::new();
    let mut found = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if read == 0 {
            break;
        }
        found += scan_line(&decode_line(&buf), table);
    }

    trace!("Found {} references in {}", found, path.display());
    Ok(found)
}

/// Scans every file in parallel, one task per file. Returns once all tasks
/// have finished, or with the first error encountered.
pub fn scan_files(files: &[PathBuf], table: &UsageTable) -> Result<ScanSummary> {
    info!("Scanning {} files in parallel", files.len());
    let references_found = files
        .par_iter()
        .map(|file| {
            trace!("Thread {:?} processing: {}", thread::current().id(), file.display());
            scan_file(file, table)
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    debug!("Scan complete: {} references in {} files", references_found, files.len());
    Ok(ScanSummary { files_scanned: files.len(), references_found })
}

/// Collects the files under `root` that survive `exclude` and scans them.
pub fn scan_tree(root: &Path, exclude: &[&str], table: &UsageTable) -> Result<ScanSummary> {
    let files = collect_files(root, exclude)?;
    scan_files(&files, table)
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

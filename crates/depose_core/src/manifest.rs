use anyhow::{Context, Result};
use log::{debug, info, trace};
use std::{collections::BTreeSet, fs, path::Path};

use crate::types::{DeclaredDependencies, PackageManifest};

/// Reads and parses the manifest at `path`, returning the declared dependency
/// names and the subset that scripts refer to.
///
/// A missing or unreadable file and malformed JSON are both errors; neither is
/// recoverable because nothing can be audited without the declarations.
pub fn read_manifest(path: &Path) -> Result<DeclaredDependencies> {
    info!("Reading manifest {}", path.display());
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = parse_manifest(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(declared_dependencies(&manifest))
}

pub fn parse_manifest(content: &str) -> Result<PackageManifest> {
    let manifest: PackageManifest = serde_json::from_str(content)?;
    trace!(
        "Parsed manifest: {} scripts, {} dependencies, {} devDependencies",
        manifest.scripts.len(),
        manifest.dependencies.len(),
        manifest.dev_dependencies.len()
    );
    Ok(manifest)
}

pub fn declared_dependencies(manifest: &PackageManifest) -> DeclaredDependencies {
    let names: BTreeSet<String> = manifest
        .dependencies
        .keys()
        .chain(manifest.dev_dependencies.keys())
        .cloned()
        .collect();
    let always_keep = script_references(&manifest.scripts.values().collect::<Vec<_>>(), &names);
    debug!(
        "Declared {} dependencies, {} referenced from scripts",
        names.len(),
        always_keep.len()
    );
    DeclaredDependencies { names, always_keep }
}

/// Returns every declared name that occurs as a literal substring of any
/// script command. A package whose CLI is invoked from a script is relied on
/// even when no source file imports it.
pub fn script_references<S: AsRef<str>>(
    scripts: &[S],
    names: &BTreeSet<String>,
) -> BTreeSet<String> {
    names
        .iter()
        .filter(|name| {
            scripts.iter().any(|script| {
                let hit = script.as_ref().contains(name.as_str());
                if hit {
                    trace!("Script '{}' references '{}'", script.as_ref(), name);
                }
                hit
            })
        })
        .cloned()
        .collect()
}

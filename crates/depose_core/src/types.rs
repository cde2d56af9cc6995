use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// The sections of a package manifest the auditor reads. Everything else in
/// the file is opaque and only ever touched by the pruner's text pass.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependencies {
    /// Union of `dependencies` and `devDependencies` keys
    pub names: BTreeSet<String>,
    /// Declared names that occur inside a script command; never removable
    pub always_keep: BTreeSet<String>,
}

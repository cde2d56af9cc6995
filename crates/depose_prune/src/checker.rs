use anyhow::Result;
use depose_core::{EXCLUDED_NAMES, UsageTable, read_manifest, scan_tree};
use log::{debug, info};

use crate::{config::Config, pruner::prune_manifest, types::CheckResult};

/// Runs the whole audit: read the manifest, scan the project, then rewrite
/// the manifest without the dependencies nothing referenced.
///
/// Any error aborts the run before the next phase starts. The manifest is
/// only rewritten when at least one dependency is unused and `dry_run` is off.
pub fn run_prune_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting unused dependency check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();
    let manifest = cfg.manifest()?.clone();

    let declared = read_manifest(&manifest)?;
    info!(
        "Found {} declared dependencies ({} used by scripts)",
        declared.names.len(),
        declared.always_keep.len()
    );

    let table = UsageTable::new(declared.names.iter().cloned());
    for name in &declared.always_keep {
        debug!("Keeping '{}': referenced from a script", name);
        table.mark_used(name);
    }

    let summary = scan_tree(&root, EXCLUDED_NAMES, &table)?;
    info!("Finished walking the directory: {} files scanned", summary.files_scanned);

    let removed = table.into_unused();
    for name in &removed {
        info!("Removing package: {}", name);
    }

    let backup = if removed.is_empty() {
        info!("All declared dependencies are referenced");
        None
    } else if cfg.dry_run {
        info!("Dry run: leaving {} untouched", manifest.display());
        None
    } else {
        Some(prune_manifest(&manifest, &removed)?.backup)
    };

    Ok(CheckResult {
        declared: declared.names,
        always_keep: declared.always_keep,
        removed,
        files_scanned: summary.files_scanned,
        backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::BTreeSet,
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn config_for(root: &Path) -> Config {
        Config { root: Some(root.to_path_buf()), ..Default::default() }
    }

    #[test]
    fn test_removes_unreferenced_dependency() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let manifest = create_test_file(
            root,
            "package.json",
            "{\n  \"dependencies\": {\n    \"lodash\": \"^4\",\n    \"chalk\": \"^5\"\n  }\n}\n",
        );
        create_test_file(root, "index.js", "const _ = require(\"lodash\");\n");

        let result = run_prune_check(config_for(root)).unwrap();
        assert_eq!(result.declared, set(&["chalk", "lodash"]));
        assert_eq!(result.removed, set(&["chalk"]));
        assert_eq!(result.files_scanned, 1);

        let rewritten = fs::read_to_string(&manifest).unwrap();
        assert_eq!(rewritten, "{\n  \"dependencies\": {\n    \"lodash\": \"^4\"}\n}\n");
        let parsed: serde_json::Value = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(parsed["dependencies"].as_object().unwrap().len(), 1);

        let backup = result.backup.unwrap();
        assert!(backup.ends_with("oldpackage.json"));
        assert!(fs::read_to_string(backup).unwrap().contains("chalk"));
    }

    #[test]
    fn test_script_reference_wins_over_unused_source() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let content = r#"{
  "scripts": {
    "build": "chalk-cli build"
  },
  "dependencies": {
    "chalk": "^5"
  }
}
"#;
        let manifest = create_test_file(root, "package.json", content);
        create_test_file(root, "src/index.js", "console.log('nothing here');\n");

        let result = run_prune_check(config_for(root)).unwrap();
        assert_eq!(result.always_keep, set(&["chalk"]));
        assert!(result.removed.is_empty());
        assert!(result.backup.is_none());
        assert_eq!(fs::read_to_string(&manifest).unwrap(), content);
        assert!(!root.join("oldpackage.json").exists());
    }

    #[test]
    fn test_import_and_local_require_in_same_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "package.json",
            r#"{ "dependencies": { "bar": "^1", "localfile": "^1" } }"#,
        );
        create_test_file(
            root,
            "src/app.js",
            "import Foo from 'bar'\nconst x = require(\"./localfile\");\n",
        );

        let mut cfg = config_for(root);
        cfg.dry_run = true;
        let result = run_prune_check(cfg).unwrap();
        assert_eq!(result.removed, set(&["localfile"]));
    }

    #[test]
    fn test_references_under_excluded_directory_do_not_count() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "package.json",
            "{\n  \"dependencies\": {\n    \"dayjs\": \"^1\",\n    \"react\": \"^18\"\n  }\n}\n",
        );
        create_test_file(root, "node_modules/lib/index.js", "import d from 'dayjs';\n");
        create_test_file(root, "node_modules/lib/deep/more.js", "import d from 'dayjs';\n");
        create_test_file(root, "src/App.jsx", "import React from 'react';\n");

        let result = run_prune_check(config_for(root)).unwrap();
        assert_eq!(result.files_scanned, 1);
        assert_eq!(result.removed, set(&["dayjs"]));
    }

    #[test]
    fn test_dev_dependencies_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let manifest = create_test_file(
            root,
            "package.json",
            r#"{
  "dependencies": {
    "express": "^4"
  },
  "devDependencies": {
    "nodemon": "^3",
    "supertest": "^6"
  }
}
"#,
        );
        create_test_file(root, "server.js", "const express = require(\"express\");\n");
        create_test_file(root, "test/app.test.js", "const request = require(\"supertest\");\n");

        let result = run_prune_check(config_for(root)).unwrap();
        assert_eq!(result.removed, set(&["nodemon"]));

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
        assert!(parsed["devDependencies"].get("nodemon").is_none());
        assert_eq!(parsed["devDependencies"]["supertest"], "^6");
    }

    #[test]
    fn test_dry_run_leaves_manifest_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let content = r#"{ "dependencies": { "chalk": "^5" } }"#;
        let manifest = create_test_file(root, "package.json", content);

        let mut cfg = config_for(root);
        cfg.dry_run = true;
        let result = run_prune_check(cfg).unwrap();
        assert_eq!(result.removed, set(&["chalk"]));
        assert!(result.backup.is_none());
        assert_eq!(fs::read_to_string(&manifest).unwrap(), content);
    }

    #[test]
    fn test_missing_manifest_fails_before_scanning() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "index.js", "import x from 'x';\n");

        let err = run_prune_check(config_for(root)).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_manifest_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "package.json", "{ not json");

        let err = run_prune_check(config_for(root)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(!root.join("oldpackage.json").exists());
    }

    #[test]
    fn test_explicit_manifest_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        let manifest = create_test_file(
            temp_dir.path(),
            "manifests/package.json",
            "{\n  \"dependencies\": {\n    \"uuid\": \"^9\"\n  }\n}\n",
        );
        create_test_file(&root, "index.js", "console.log(1);\n");

        let cfg = Config {
            root: Some(root.clone()),
            manifest: Some(manifest.clone()),
            dry_run: false,
        };
        let result = run_prune_check(cfg).unwrap();
        assert_eq!(result.removed, set(&["uuid"]));
        assert_eq!(result.backup, Some(temp_dir.path().join("manifests/oldpackage.json")));
    }
}

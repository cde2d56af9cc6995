use anyhow::{Result, anyhow};
use clap::Parser;
use depose_core::MANIFEST_FILE_NAME;
use log::{debug, info};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "prune")]
#[command(about = "Remove dependencies that no project file references from package.json")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Manifest to audit (defaults to <root>/package.json)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Report unused dependencies without rewriting the manifest
    #[arg(long)]
    pub dry_run: bool,
}

impl Config {
    /// Initialize the config by resolving the root directory and manifest path
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, using current directory");
            env::current_dir()?
        };
        info!("Using root directory: {}", root.display());

        let manifest = self.manifest.take().unwrap_or_else(|| root.join(MANIFEST_FILE_NAME));
        debug!("Using manifest: {}", manifest.display());

        self.root = Some(root);
        self.manifest = Some(manifest);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Get the manifest path, returning an error if not initialized
    pub fn manifest(&self) -> Result<&PathBuf> {
        self.manifest
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

//! Project layout: where domains, modules, and their directories live.

use crate::config::SeedConfig;
use crate::manifest::{MANIFEST_FILE, ModuleRef};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const PUBLIC_DIR: &str = "Public";
pub const PRIVATE_DIR: &str = "Private";
pub const TEST_DIR: &str = "Test";

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    pub config: SeedConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: SeedConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Open the project rooted at `root`, reading `seed.toml` if present.
    pub fn open(root: &Path) -> Result<Self> {
        let config = SeedConfig::load(root)?;
        Ok(Self::new(root, config))
    }

    /// Open the project rooted at the current directory.
    pub fn discover() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        Self::open(&root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.source_dir)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.templates_dir)
    }

    pub fn domain_dir(&self, domain: &str) -> PathBuf {
        self.source_dir().join(domain)
    }

    pub fn module_dir(&self, module: &ModuleRef) -> PathBuf {
        self.domain_dir(&module.domain).join(&module.module)
    }

    pub fn manifest_path(&self, module: &ModuleRef) -> PathBuf {
        self.module_dir(module).join(MANIFEST_FILE)
    }

    pub fn public_dir(&self, module: &ModuleRef) -> PathBuf {
        self.module_dir(module).join(PUBLIC_DIR)
    }

    pub fn private_dir(&self, module: &ModuleRef) -> PathBuf {
        self.module_dir(module).join(PRIVATE_DIR)
    }

    pub fn test_dir(&self, module: &ModuleRef) -> PathBuf {
        self.module_dir(module).join(TEST_DIR)
    }

    pub fn domain_exists(&self, domain: &str) -> bool {
        self.domain_dir(domain).is_dir()
    }

    /// A module exists when its directory holds a manifest.
    pub fn module_exists(&self, module: &ModuleRef) -> bool {
        self.manifest_path(module).is_file()
    }

    /// Domain directories under the source root, sorted by name.
    pub fn domains(&self) -> io::Result<Vec<String>> {
        let source_dir = self.source_dir();
        if !source_dir.is_dir() {
            return Ok(Vec::new());
        }
        sorted_subdirs(&source_dir)
    }

    /// Modules (directories with a manifest) in `domain`, sorted by name.
    pub fn modules(&self, domain: &str) -> io::Result<Vec<ModuleRef>> {
        let domain_dir = self.domain_dir(domain);
        if !domain_dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(sorted_subdirs(&domain_dir)?
            .into_iter()
            .map(|name| ModuleRef::new(domain, name))
            .filter(|m| self.module_exists(m))
            .collect())
    }

    /// Every module in every domain, sorted by domain then module.
    pub fn all_modules(&self) -> io::Result<Vec<ModuleRef>> {
        let mut modules = Vec::new();
        for domain in self.domains()? {
            modules.extend(self.modules(&domain)?);
        }
        Ok(modules)
    }
}

fn sorted_subdirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

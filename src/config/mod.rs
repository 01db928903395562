//! Vendorization configuration
//!
//! [`VendorConfig`] is built once per run from the `vendorize` block of the
//! vendorizing package's `package.json` (see [`manifest`]) plus any CLI
//! overrides, and is read-only afterwards.

pub mod manifest;

use std::path::{Component, Path, PathBuf};

use crate::domain::Locator;
use crate::error::{Result, config};

pub use manifest::{
    DetailedEntry, MANIFEST_FILE, PackageEntry, PackageManifest, VendorizeBlock,
};

pub const DEFAULT_DIR_NAME: &str = "vendor";

/// One package to vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub include_transitive: bool,
}

/// Per-invocation overrides layered over the manifest block
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dir_name: Option<String>,
    pub clean_before: bool,
    pub no_git_ignore: bool,
    pub transitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub owner_name: String,
    pub requests: Vec<PackageRequest>,
    pub dir_name: String,
    pub clean_before: bool,
    pub git_ignore: bool,
}

impl VendorConfig {
    /// Configuration with defaults: `vendor/`, no clean, `.gitignore` on
    pub fn new(owner_name: impl Into<String>, requests: Vec<PackageRequest>) -> Self {
        Self {
            owner_name: owner_name.into(),
            requests,
            dir_name: DEFAULT_DIR_NAME.to_string(),
            clean_before: false,
            git_ignore: true,
        }
    }

    /// Read the configuration of the package rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Configuration errors for a missing or malformed `package.json`, a
    /// missing `vendorize` key, or a block of the wrong shape.
    pub fn load(project_root: &Path, owner: &Locator) -> Result<Self> {
        let manifest_path = project_root.join(MANIFEST_FILE);
        let manifest = PackageManifest::load(&manifest_path)?;

        let owner_name = owner
            .name
            .clone()
            .or_else(|| manifest.name.clone())
            .or_else(|| {
                project_root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "root".to_string());

        let value = manifest
            .vendorize
            .ok_or_else(|| config::key_missing(manifest_path.display().to_string()))?;

        Self::from_block(owner_name, VendorizeBlock::from_value(value)?)
    }

    /// Normalize a decoded block into a validated configuration
    pub fn from_block(owner_name: impl Into<String>, block: VendorizeBlock) -> Result<Self> {
        let (entries, options) = match block {
            VendorizeBlock::List(entries) => (entries, None),
            VendorizeBlock::Object(options) => {
                let entries = options.packages.clone().into_entries();
                (entries, Some(options))
            }
        };

        let transitive_default = options
            .as_ref()
            .and_then(|o| o.transitive)
            .unwrap_or(false);
        let requests = entries
            .into_iter()
            .map(|entry| to_request(entry, transitive_default))
            .collect::<Result<Vec<_>>>()?;

        let mut config = Self::new(owner_name, requests);
        if let Some(options) = options {
            if let Some(dir_name) = options.dir_name {
                config.dir_name = dir_name;
            }
            if let Some(clean_before) = options.clean_before {
                config.clean_before = clean_before;
            }
            if let Some(git_ignore) = options.git_ignore {
                config.git_ignore = git_ignore;
            }
        }

        validate_dir_name(&config.dir_name)?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(dir_name) = &overrides.dir_name {
            validate_dir_name(dir_name)?;
            self.dir_name.clone_from(dir_name);
        }
        if overrides.clean_before {
            self.clean_before = true;
        }
        if overrides.no_git_ignore {
            self.git_ignore = false;
        }
        if overrides.transitive {
            for request in &mut self.requests {
                request.include_transitive = true;
            }
        }
        Ok(self)
    }

    /// Absolute output directory for a package rooted at `project_root`
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.dir_name)
    }
}

fn to_request(entry: PackageEntry, transitive_default: bool) -> Result<PackageRequest> {
    let (name, transitive) = match entry {
        PackageEntry::Name(name) => (name, None),
        PackageEntry::Detailed(DetailedEntry { name, transitive }) => (name, transitive),
    };

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(config::invalid("package names must not be empty"));
    }

    Ok(PackageRequest {
        name,
        include_transitive: transitive.unwrap_or(transitive_default),
    })
}

/// The output directory must stay inside the project: relative, no `..`,
/// and naming at least one real directory (so cleaning never hits the root)
fn validate_dir_name(dir_name: &str) -> Result<()> {
    let path = Path::new(dir_name);
    let mut has_name = false;

    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(config::invalid(format!(
                    "dirName '{dir_name}' must be a directory inside the package"
                )));
            }
        }
    }

    if has_name {
        Ok(())
    } else {
        Err(config::invalid("dirName must not be empty"))
    }
}

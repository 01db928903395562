//! Shared setup for commands that resolve packages

use std::path::PathBuf;

use crate::config::{ConfigOverrides, VendorConfig};
use crate::domain::Locator;
use crate::error::{Result, resolution};
use crate::pnp::PnpStore;
use crate::resolver::ResolverAdapter;

/// Everything a run needs before the vendor set is built: the store, the
/// vendorizing package, and its configuration
pub struct Session {
    pub store: PnpStore,
    pub owner: Locator,
    pub project_root: PathBuf,
    pub config: VendorConfig,
}

impl Session {
    /// Locate the store and the vendorizing package from `cwd`, then read
    /// its configuration. Nothing on disk is modified.
    pub fn open(cwd: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<Self> {
        let cwd = match cwd {
            Some(path) => path,
            None => std::env::current_dir()?,
        };

        let store = PnpStore::discover(&cwd)?;
        let resolver = ResolverAdapter::for_path(&store, &cwd)?;
        let owner = resolver.owner().clone();
        let project_root = resolver
            .owner_location()
            .map(std::path::Path::to_path_buf)
            .ok_or_else(|| resolution::owner_not_found(cwd.display().to_string()))?;

        tracing::debug!(
            state = %store.state_path().display(),
            owner = %owner,
            root = %project_root.display(),
            "opened session"
        );

        let config = VendorConfig::load(&project_root, &owner)?.with_overrides(overrides)?;
        if config.requests.is_empty() {
            tracing::warn!(owner = %config.owner_name, "no packages configured to vendorize");
        }

        Ok(Self {
            store,
            owner,
            project_root,
            config,
        })
    }

    pub fn resolver(&self) -> ResolverAdapter<'_> {
        ResolverAdapter::new(&self.store, self.owner.clone())
    }
}

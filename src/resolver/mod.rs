//! Package resolution against the PnP store
//!
//! [`ResolverAdapter`] answers "where is package X and what does it depend
//! on" from the point of view of one issuer. Top-level requests resolve from
//! the vendorizing package; transitive dependencies resolve from the package
//! that declares them, so two siblings may receive different versions of the
//! same name.
//!
//! Missing packages are reported as `None`. [`expand`] decides whether that
//! is fatal.

pub mod expand;

use std::path::Path;

pub use expand::expand;

use crate::domain::{Locator, PackageSource, ResolvedPackage};
use crate::error::{Result, resolution};
use crate::pnp::PnpApi;

/// Resolution context rooted at the vendorizing package
pub struct ResolverAdapter<'a> {
    api: &'a dyn PnpApi,
    owner: Locator,
}

impl<'a> ResolverAdapter<'a> {
    pub fn new(api: &'a dyn PnpApi, owner: Locator) -> Self {
        Self { api, owner }
    }

    /// Root the context at the package owning `path`
    pub fn for_path(api: &'a dyn PnpApi, path: &Path) -> Result<Self> {
        let owner = api
            .find_package_locator(path)
            .ok_or_else(|| resolution::owner_not_found(path.display().to_string()))?;
        tracing::debug!(owner = %owner, "resolved vendorizing package");
        Ok(Self::new(api, owner))
    }

    pub fn owner(&self) -> &Locator {
        &self.owner
    }

    /// Absolute location of the vendorizing package
    pub fn owner_location(&self) -> Option<&Path> {
        self.api
            .package_information(&self.owner)
            .map(|info| info.location.as_path())
    }

    /// Resolve `name` as a dependency of the vendorizing package
    pub fn locate(&self, name: &str) -> Option<ResolvedPackage> {
        self.locate_from(&self.owner, name)
    }

    /// Resolve `name` as a dependency of `issuer`
    pub fn locate_from(&self, issuer: &Locator, name: &str) -> Option<ResolvedPackage> {
        let target = self.api.package_information(issuer)?.dependency(name)?.clone();
        self.resolve_locator(&target)
    }

    /// Turn a locator into a [`ResolvedPackage`].
    ///
    /// Unmet peers and the self-reference Yarn adds to every package are
    /// left out of the dependency list.
    pub fn resolve_locator(&self, locator: &Locator) -> Option<ResolvedPackage> {
        let info = self.api.package_information(locator)?;
        let name = locator.name.clone()?;
        let version = locator.reference.clone()?;

        let dependencies = info
            .dependencies
            .iter()
            .filter_map(|(dep_name, target)| {
                let target = target.as_ref()?;
                (target != locator).then(|| (dep_name.clone(), target.clone()))
            })
            .collect();

        Some(ResolvedPackage {
            name,
            version,
            source: PackageSource::from_location(&info.location),
            dependencies,
        })
    }
}

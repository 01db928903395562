//! Yarn Plug'n'Play resolution store
//!
//! The vendorizer only needs two questions answered by the store, captured
//! by the [`PnpApi`] trait:
//!
//! - which package owns a given path (`find_package_locator`)
//! - where a package lives and what it depends on (`package_information`)
//!
//! [`PnpStore`] answers them from the serialized state Yarn writes next to
//! the project (`.pnp.data.json`, or the state inlined in `.pnp.cjs`).
//! Tests substitute an in-memory implementation.

pub mod runtime;
pub mod store;
pub mod virtual_fs;

use std::path::{Path, PathBuf};

use crate::domain::Locator;

pub use store::PnpStore;

/// File holding the serialized runtime state when inlining is disabled
pub const DATA_FILE: &str = ".pnp.data.json";
/// Runtime script, optionally carrying the inlined state
pub const RUNTIME_FILE: &str = ".pnp.cjs";

/// Location and dependency map of one package instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInformation {
    /// Absolute package root
    pub location: PathBuf,
    /// Dependency name to resolved locator; `None` marks an unmet peer
    pub dependencies: Vec<(String, Option<Locator>)>,
}

impl PackageInformation {
    /// Look up how `name` resolves from this package
    pub fn dependency(&self, name: &str) -> Option<&Locator> {
        self.dependencies
            .iter()
            .find(|(dep_name, _)| dep_name == name)
            .and_then(|(_, target)| target.as_ref())
    }
}

/// Read-only view of a PnP resolution store
pub trait PnpApi {
    /// Package owning `path`, if any
    fn find_package_locator(&self, path: &Path) -> Option<Locator>;

    /// Location and dependencies of `locator`, if the store knows it
    fn package_information(&self, locator: &Locator) -> Option<&PackageInformation>;
}

//! Test fixtures and utilities for reducing test setup duplication.
//!
//! [`FakePnp`] is an in-memory [`PnpApi`] so the resolver, expander and
//! executor can be exercised without a Yarn install on disk.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakePnp, write_files};
//!
//! let temp = create_temp_dir();
//! let source = temp.path().join("store/left-pad");
//! write_files(&source, &[("index.js", "module.exports = 1;")]);
//!
//! let api = FakePnp::new()
//!     .with_workspace("app", temp.path().join("app"), &[("left-pad", "npm:1.3.0")])
//!     .with_package("left-pad", "npm:1.3.0", &source, &[]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::Locator;
use crate::pnp::{PackageInformation, PnpApi};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write `(relative path, content)` pairs below `root`, creating parents.
///
/// # Panics
///
/// Panics if any directory or file cannot be written.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
}

/// In-memory PnP store
#[derive(Debug, Default)]
pub struct FakePnp {
    packages: HashMap<Locator, PackageInformation>,
    locations: Vec<(PathBuf, Locator)>,
}

impl FakePnp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the vendorizing workspace as `name@workspace:.`
    #[must_use]
    pub fn with_workspace(
        self,
        name: &str,
        location: impl AsRef<Path>,
        dependencies: &[(&str, &str)],
    ) -> Self {
        self.with_package(name, "workspace:.", location, dependencies)
    }

    /// Register a package; dependencies are `(name, reference)` pairs
    #[must_use]
    pub fn with_package(
        mut self,
        name: &str,
        reference: &str,
        location: impl AsRef<Path>,
        dependencies: &[(&str, &str)],
    ) -> Self {
        let locator = Locator::new(name, reference);
        let location = location.as_ref().to_path_buf();
        let dependencies = dependencies
            .iter()
            .map(|(dep, dep_ref)| (dep.to_string(), Some(Locator::new(*dep, *dep_ref))))
            .collect();

        self.locations.push((location.clone(), locator.clone()));
        self.packages.insert(
            locator,
            PackageInformation {
                location,
                dependencies,
            },
        );
        self
    }
}

impl PnpApi for FakePnp {
    fn find_package_locator(&self, path: &Path) -> Option<Locator> {
        self.locations
            .iter()
            .filter(|(location, _)| path.starts_with(location))
            .max_by_key(|(location, _)| location.components().count())
            .map(|(_, locator)| locator.clone())
    }

    fn package_information(&self, locator: &Locator) -> Option<&PackageInformation> {
        self.packages.get(locator)
    }
}

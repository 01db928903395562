//! Ordered, deduplicated set of packages to vendor

use std::collections::HashMap;

use super::package::{PackageKey, ResolvedPackage};

/// Packages to materialize, keyed by `(name, version)`.
///
/// Iteration follows first-insertion order. Inserting a key that is already
/// present replaces its metadata in place without moving it.
#[derive(Debug, Clone, Default)]
pub struct VendorSet {
    packages: Vec<ResolvedPackage>,
    index: HashMap<PackageKey, usize>,
}

impl VendorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, returning `true` if its key was not present yet
    pub fn insert(&mut self, package: ResolvedPackage) -> bool {
        let key = package.key();
        if let Some(&position) = self.index.get(&key) {
            self.packages[position] = package;
            return false;
        }

        self.index.insert(key, self.packages.len());
        self.packages.push(package);
        true
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedPackage> {
        self.packages.iter()
    }
}

impl<'a> IntoIterator for &'a VendorSet {
    type Item = &'a ResolvedPackage;
    type IntoIter = std::slice::Iter<'a, ResolvedPackage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

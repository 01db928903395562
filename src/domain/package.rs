//! Package identity and resolved package types

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Identity of one resolved package instance in the dependency graph.
///
/// The project's top-level locator has neither a name nor a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator {
    pub name: Option<String>,
    pub reference: Option<String>,
}

impl Locator {
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            reference: Some(reference.into()),
        }
    }

    #[cfg(test)]
    pub fn top_level() -> Self {
        Self {
            name: None,
            reference: None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.name.is_none()
    }

    /// Virtual instances stand for a package once per set of resolved peers
    pub fn is_virtual(&self) -> bool {
        self.reference
            .as_deref()
            .is_some_and(|reference| reference.starts_with("virtual:"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.reference) {
            (Some(name), Some(reference)) => write!(f, "{name}@{reference}"),
            (Some(name), None) => write!(f, "{name}"),
            _ => write!(f, "<top-level>"),
        }
    }
}

/// Where a package's files live on disk.
///
/// Yarn keeps most packages inside zip archives in its cache; unplugged,
/// workspace and portal packages are plain directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    Directory(PathBuf),
    Archive {
        archive: PathBuf,
        /// Directory inside the archive, `/`-separated, no trailing slash
        inner: String,
    },
}

impl PackageSource {
    /// Classify an absolute package location.
    ///
    /// The first path component ending in `.zip` splits the location into
    /// the archive file and the directory inside it.
    pub fn from_location(location: &Path) -> Self {
        let mut archive = PathBuf::new();
        let mut components = location.components();

        while let Some(component) = components.next() {
            archive.push(component.as_os_str());
            let is_zip = matches!(component, Component::Normal(name)
                if name.to_string_lossy().to_ascii_lowercase().ends_with(".zip"));
            if is_zip {
                let inner = components
                    .by_ref()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                return PackageSource::Archive { archive, inner };
            }
        }

        PackageSource::Directory(location.to_path_buf())
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSource::Directory(path) => write!(f, "{}", path.display()),
            PackageSource::Archive { archive, inner } => {
                write!(f, "{}/{inner}", archive.display())
            }
        }
    }
}

/// Identity key of a resolved package: `(name, version)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageKey {
    pub name: String,
    pub version: String,
}

/// A package resolved through the PnP store, ready to be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    /// Locator reference, e.g. `npm:1.3.0` or `workspace:packages/a`
    pub version: String,
    pub source: PackageSource,
    /// Dependencies as seen from this package, in store order
    pub dependencies: Vec<(String, Locator)>,
}

impl ResolvedPackage {
    pub fn key(&self) -> PackageKey {
        PackageKey {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    pub fn locator(&self) -> Locator {
        Locator::new(&self.name, &self.version)
    }
}

/// One line of the emitted vendor manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyManifestEntry {
    /// Path below the vendor directory, `/`-separated
    pub relative_target_path: String,
    /// `name@reference` of the package copied there
    pub source_package: String,
}

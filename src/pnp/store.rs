//! PnP store backed by Yarn's serialized runtime state

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use super::{DATA_FILE, PackageInformation, PnpApi, RUNTIME_FILE, runtime, virtual_fs};
use crate::domain::Locator;
use crate::error::{Result, resolution};

/// Serialized runtime state, as written to `.pnp.data.json`.
///
/// Only the registry is needed; fallback pools and ignore patterns are
/// resolution concerns the vendorizer does not reproduce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedState {
    package_registry_data: Vec<(Option<String>, Vec<(Option<String>, RawPackageInformation)>)>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackageInformation {
    package_location: String,
    #[serde(default)]
    package_dependencies: Vec<(String, Option<RawDependencyTarget>)>,
}

/// A dependency either points at a reference of the same name, or is an
/// alias to `[name, reference]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependencyTarget {
    Reference(String),
    Alias(String, String),
}

impl RawDependencyTarget {
    fn into_locator(self, dependency_name: &str) -> Locator {
        match self {
            RawDependencyTarget::Reference(reference) => Locator::new(dependency_name, reference),
            RawDependencyTarget::Alias(name, reference) => Locator::new(name, reference),
        }
    }
}

/// PnP store loaded from disk
#[derive(Debug)]
pub struct PnpStore {
    state_path: PathBuf,
    packages: HashMap<Locator, PackageInformation>,
    /// Package locations in registry order, for owner lookups
    locations: Vec<(PathBuf, Locator)>,
}

impl PnpStore {
    /// Find and load the PnP state governing `start`.
    ///
    /// Walks up from `start` to the first directory holding `.pnp.data.json`
    /// or `.pnp.cjs`; the data file wins when both exist.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = dunce::canonicalize(start).unwrap_or_else(|_| normalize_path(start));

        for dir in start.ancestors() {
            for file in [DATA_FILE, RUNTIME_FILE] {
                let candidate = dir.join(file);
                if candidate.is_file() {
                    tracing::debug!(state = %candidate.display(), "found PnP state");
                    return Self::load(&candidate);
                }
            }
        }

        Err(resolution::pnp_not_found(start.display().to_string()))
    }

    /// Load a `.pnp.data.json` or `.pnp.cjs` file
    pub fn load(state_path: &Path) -> Result<Self> {
        let invalid =
            |reason: String| resolution::state_invalid(state_path.display().to_string(), reason);

        let content = std::fs::read_to_string(state_path).map_err(|e| invalid(e.to_string()))?;
        let is_runtime = state_path
            .file_name()
            .is_some_and(|name| name == RUNTIME_FILE);

        let json = if is_runtime {
            runtime::extract_runtime_state(&content)
                .ok_or_else(|| invalid("no inlined RAW_RUNTIME_STATE".to_string()))?
        } else {
            content
        };

        let root = state_path.parent().unwrap_or_else(|| Path::new("."));
        let root = dunce::canonicalize(root).unwrap_or_else(|_| normalize_path(root));

        Self::from_json(&json, &root, state_path)
    }

    /// Build a store from serialized state whose locations are relative to `root`
    pub fn from_json(json: &str, root: &Path, state_path: &Path) -> Result<Self> {
        let state: SerializedState = serde_json::from_str(json).map_err(|e| {
            resolution::state_invalid(state_path.display().to_string(), e.to_string())
        })?;

        let mut packages = HashMap::new();
        let mut locations = Vec::new();

        for (name, references) in state.package_registry_data {
            for (reference, raw) in references {
                let locator = Locator {
                    name: name.clone(),
                    reference,
                };
                let location = virtual_fs::resolve_virtual(&normalize_path(
                    &root.join(&raw.package_location),
                ));
                let dependencies = raw
                    .package_dependencies
                    .into_iter()
                    .map(|(dep_name, target)| {
                        let locator = target.map(|t| t.into_locator(&dep_name));
                        (dep_name, locator)
                    })
                    .collect();

                locations.push((location.clone(), locator.clone()));
                packages.insert(
                    locator,
                    PackageInformation {
                        location,
                        dependencies,
                    },
                );
            }
        }

        tracing::debug!(packages = packages.len(), "loaded PnP registry");

        Ok(Self {
            state_path: state_path.to_path_buf(),
            packages,
            locations,
        })
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

impl PnpApi for PnpStore {
    fn find_package_locator(&self, path: &Path) -> Option<Locator> {
        let path = dunce::canonicalize(path).unwrap_or_else(|_| normalize_path(path));

        // Deepest owning location wins; on a tie a named workspace beats the
        // anonymous top-level entry, and the real instance beats its virtual
        // copies, which resolve to the same directory
        self.locations
            .iter()
            .filter(|(location, _)| path.starts_with(location))
            .max_by_key(|(location, locator)| {
                (
                    location.components().count(),
                    !locator.is_top_level(),
                    !locator.is_virtual(),
                )
            })
            .map(|(_, locator)| locator.clone())
    }

    fn package_information(&self, locator: &Locator) -> Option<&PackageInformation> {
        self.packages.get(locator)
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// Cache locations point inside zip archives, which `canonicalize` cannot
/// follow.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_with_name = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if ends_with_name {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

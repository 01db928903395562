//! Expansion of configured requests into the set of packages to vendor
//!
//! ## Algorithm
//!
//! Requests are processed in configuration order. Each requested package is
//! resolved from the vendorizing package and inserted into the
//! [`VendorSet`]. When the request asks for transitive dependencies, a
//! breadth-first walk follows each package's dependency list, resolving
//! every dependency from the package that declares it.
//!
//! A package is walked at most once per run (tracked by `(name, version)`),
//! which terminates cyclic graphs:
//!
//! ```text
//! a -> b -> a
//!
//! VendorSet: [a, b]
//! ```
//!
//! Emission order is the order of first insertion: requests first-come,
//! transitive dependencies breadth-first behind the request that pulled them.

use std::collections::{HashSet, VecDeque};

use super::ResolverAdapter;
use crate::config::PackageRequest;
use crate::domain::{PackageKey, ResolvedPackage, VendorSet};
use crate::error::{Result, resolution};

/// Resolve and expand `requests` into a deduplicated, ordered [`VendorSet`].
///
/// # Errors
///
/// Returns a resolution error if a requested package, or any dependency
/// reached by a transitive walk, cannot be resolved.
pub fn expand(resolver: &ResolverAdapter<'_>, requests: &[PackageRequest]) -> Result<VendorSet> {
    let mut set = VendorSet::new();
    let mut walked = HashSet::new();

    for request in requests {
        let package = resolver.locate(&request.name).ok_or_else(|| {
            resolution::package_not_found(&request.name, resolver.owner().to_string())
        })?;

        tracing::debug!(
            package = %package.locator(),
            transitive = request.include_transitive,
            "resolved request"
        );

        set.insert(package.clone());

        if request.include_transitive {
            walk_dependencies(resolver, package, &mut set, &mut walked)?;
        }
    }

    tracing::info!(
        requested = requests.len(),
        packages = set.len(),
        "expanded vendor set"
    );

    Ok(set)
}

/// Breadth-first walk from `root`, inserting every reachable package
fn walk_dependencies(
    resolver: &ResolverAdapter<'_>,
    root: ResolvedPackage,
    set: &mut VendorSet,
    walked: &mut HashSet<PackageKey>,
) -> Result<()> {
    let mut queue = VecDeque::from([root]);

    while let Some(package) = queue.pop_front() {
        if !walked.insert(package.key()) {
            continue;
        }

        for (dep_name, target) in &package.dependencies {
            let dependency = resolver.resolve_locator(target).ok_or_else(|| {
                resolution::transitive_not_found(dep_name, package.locator().to_string())
            })?;

            if set.insert(dependency.clone()) {
                tracing::debug!(
                    package = %dependency.locator(),
                    parent = %package.locator(),
                    "added transitive dependency"
                );
            }

            if !walked.contains(&dependency.key()) {
                queue.push_back(dependency);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locator;
    use crate::error::VendorizeError;
    use crate::test_fixtures::FakePnp;

    fn request(name: &str, transitive: bool) -> PackageRequest {
        PackageRequest {
            name: name.to_string(),
            include_transitive: transitive,
        }
    }

    fn names(set: &VendorSet) -> Vec<String> {
        set.iter()
            .map(|p| format!("{}@{}", p.name, p.version))
            .collect()
    }

    fn owner() -> Locator {
        Locator::new("app", "workspace:.")
    }

    #[test]
    fn test_direct_requests_keep_order() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("b", "npm:1"), ("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[])
            .with_package("b", "npm:1", "/s/b", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("b", false), request("a", false)]).unwrap();
        assert_eq!(names(&set), ["b@npm:1", "a@npm:1"]);
    }

    #[test]
    fn test_non_transitive_request_skips_dependencies() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("b", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", false)]).unwrap();
        assert_eq!(names(&set), ["a@npm:1"]);
    }

    #[test]
    fn test_transitive_walk_is_breadth_first() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("b", "npm:1"), ("c", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[("d", "npm:1")])
            .with_package("c", "npm:1", "/s/c", &[])
            .with_package("d", "npm:1", "/s/d", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", true)]).unwrap();
        assert_eq!(names(&set), ["a@npm:1", "b@npm:1", "c@npm:1", "d@npm:1"]);
    }

    #[test]
    fn test_cycle_terminates_without_duplicates() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("b", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[("a", "npm:1")]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", true)]).unwrap();
        assert_eq!(names(&set), ["a@npm:1", "b@npm:1"]);
    }

    #[test]
    fn test_shared_dependency_deduplicated() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1"), ("b", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("shared", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[("shared", "npm:1")])
            .with_package("shared", "npm:1", "/s/shared", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", true), request("b", true)]).unwrap();
        assert_eq!(names(&set), ["a@npm:1", "shared@npm:1", "b@npm:1"]);

        let keys: HashSet<_> = set.iter().map(ResolvedPackage::key).collect();
        assert_eq!(keys.len(), set.len());
    }

    #[test]
    fn test_same_name_two_versions_both_kept() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1"), ("b", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("shared", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[("shared", "npm:2")])
            .with_package("shared", "npm:1", "/s/shared-1", &[])
            .with_package("shared", "npm:2", "/s/shared-2", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", true), request("b", true)]).unwrap();
        assert_eq!(
            names(&set),
            ["a@npm:1", "shared@npm:1", "b@npm:1", "shared@npm:2"]
        );
    }

    #[test]
    fn test_package_requested_twice_walks_when_later_transitive() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("b", "npm:1")])
            .with_package("b", "npm:1", "/s/b", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let set = expand(&resolver, &[request("a", false), request("a", true)]).unwrap();
        assert_eq!(names(&set), ["a@npm:1", "b@npm:1"]);
    }

    #[test]
    fn test_unresolvable_request_is_fatal() {
        let api = FakePnp::new().with_workspace("app", "/app", &[]);
        let resolver = ResolverAdapter::new(&api, owner());

        let err = expand(&resolver, &[request("left-pad", false)]).unwrap_err();
        assert!(
            matches!(err, VendorizeError::PackageNotFound { ref name, .. } if name == "left-pad")
        );
    }

    #[test]
    fn test_unresolvable_transitive_dependency_is_fatal() {
        let api = FakePnp::new()
            .with_workspace("app", "/app", &[("a", "npm:1")])
            .with_package("a", "npm:1", "/s/a", &[("ghost", "npm:1")]);
        let resolver = ResolverAdapter::new(&api, owner());

        let err = expand(&resolver, &[request("a", true)]).unwrap_err();
        assert!(
            matches!(err, VendorizeError::TransitiveNotFound { ref name, .. } if name == "ghost")
        );
    }
}

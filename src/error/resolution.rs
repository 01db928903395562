//! Resolution errors

use super::impl_error_constructors;

impl_error_constructors! {
    /// Creates an error for a directory tree without any PnP state file
    pnp_not_found => PnpNotFound { path },
    /// Creates an error for an unreadable or malformed PnP state file
    state_invalid => PnpStateInvalid { path, reason },
    /// Creates an error for a path no package in the store owns
    owner_not_found => OwnerNotFound { path },
    /// Creates a package not found error
    package_not_found => PackageNotFound { name, issuer },
    /// Creates an error for an unresolvable transitive dependency
    transitive_not_found => TransitiveNotFound { name, parent },
    /// Creates an error for a package name that cannot map to a directory
    invalid_name => InvalidPackageName { name },
}

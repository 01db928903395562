//! Domain models for pnp-vendorize
//!
//! Pure value types shared by the resolver, the expander and the executor.

pub mod package;
pub mod vendor_set;

pub use package::{CopyManifestEntry, Locator, PackageKey, PackageSource, ResolvedPackage};
pub use vendor_set::VendorSet;

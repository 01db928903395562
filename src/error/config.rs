//! Configuration errors

use super::impl_error_constructors;

impl_error_constructors! {
    /// Creates a manifest not found error
    manifest_not_found => ManifestNotFound { path },
    /// Creates a manifest read failed error
    manifest_read_failed => ManifestReadFailed { path, reason },
    /// Creates a manifest parse failed error
    manifest_parse_failed => ManifestParseFailed { path, reason },
    /// Creates a missing `vendorize` key error
    key_missing => VendorizeKeyMissing { path },
    /// Creates an invalid config error
    invalid => ConfigInvalid { message },
}

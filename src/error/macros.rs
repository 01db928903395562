//! Error constructor macros for consistent error construction
//!
//! Each error domain module (`config`, `resolution`, `fs`) declares its
//! constructors through [`impl_error_constructors!`] so every call site
//! builds variants the same way, taking anything string-like.

/// Generate `pub fn` constructors for `VendorizeError` variants.
///
/// # Example
/// ```rust,ignore
/// impl_error_constructors! {
///     /// Creates a package not found error
///     package_not_found => PackageNotFound { name, issuer },
/// }
///
/// let err = package_not_found("left-pad", "my-app@workspace:.");
/// ```
macro_rules! impl_error_constructors {
    ($($(#[$meta:meta])* $fn_name:ident => $variant:ident { $($field:ident),* $(,)? }),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name($($field: impl Into<String>),*) -> $crate::error::VendorizeError {
                $crate::error::VendorizeError::$variant {
                    $($field: $field.into()),*
                }
            }
        )*
    };
}

pub(crate) use impl_error_constructors;

/// Build a filesystem error from a path and an I/O (or walk) failure.
///
/// # Example
/// ```rust,ignore
/// std::fs::copy(&src, &dst).map_err(|e| fs_error!(FileWriteFailed, dst.display(), e))?;
/// ```
macro_rules! fs_error {
    ($variant:ident, $path:expr, $err:expr) => {
        $crate::error::VendorizeError::$variant {
            path: $path.to_string(),
            reason: $err.to_string(),
        }
    };
}

pub(crate) use fs_error;

//! Error types and handling for pnp-vendorize
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into three fatal families, mirrored by the sub-modules that
//! hold their constructors:
//! - [`config`]: the `vendorize` block is missing or malformed
//! - [`resolution`]: the PnP store cannot answer for a package
//! - [`fs`]: cleaning, copying or writing the vendor tree failed
//!
//! Every error aborts the run; there is no warnings-only mode.

pub mod config;
pub mod fs;
mod macros;
pub mod resolution;

pub(crate) use macros::{fs_error, impl_error_constructors};

use miette::Diagnostic;
use thiserror::Error;

/// Broad family of a [`VendorizeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resolution,
    Filesystem,
}

/// Main error type for vendorize operations
#[derive(Error, Diagnostic, Debug)]
pub enum VendorizeError {
    // Configuration errors
    #[error("Package manifest not found: {path}")]
    #[diagnostic(
        code(vendorize::config::manifest_not_found),
        help("Run pnp-vendorize from inside a package that has a package.json")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to read package manifest: {path}: {reason}")]
    #[diagnostic(code(vendorize::config::manifest_read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to parse package manifest: {path}: {reason}")]
    #[diagnostic(code(vendorize::config::manifest_parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("No \"vendorize\" found for this package: {path}")]
    #[diagnostic(
        code(vendorize::config::key_missing),
        help("Add a \"vendorize\" key to package.json, e.g. \"vendorize\": [\"left-pad\"]")
    )]
    VendorizeKeyMissing { path: String },

    #[error("Invalid vendorize configuration: {message}")]
    #[diagnostic(
        code(vendorize::config::invalid),
        help(
            "\"vendorize\" must either be an array of package names or an object containing a \"packages\" key"
        )
    )]
    ConfigInvalid { message: String },

    // Resolution errors
    #[error("Plug'n'Play state not found above: {path}")]
    #[diagnostic(
        code(vendorize::resolve::pnp_not_found),
        help("Vendorize requires Yarn Plug'n'Play; run 'yarn install' with nodeLinker: pnp")
    )]
    PnpNotFound { path: String },

    #[error("Invalid Plug'n'Play state in {path}: {reason}")]
    #[diagnostic(code(vendorize::resolve::state_invalid))]
    PnpStateInvalid { path: String, reason: String },

    #[error("Could not find the current package location to vendorize into: {path}")]
    #[diagnostic(code(vendorize::resolve::owner_not_found))]
    OwnerNotFound { path: String },

    #[error("Package '{name}' cannot be resolved from {issuer}")]
    #[diagnostic(
        code(vendorize::resolve::package_not_found),
        help("Add the package to the dependencies of the vendorizing package and run 'yarn install'")
    )]
    PackageNotFound { name: String, issuer: String },

    #[error("Dependency '{name}' of {parent} cannot be resolved")]
    #[diagnostic(code(vendorize::resolve::transitive_not_found))]
    TransitiveNotFound { name: String, parent: String },

    #[error("Package name cannot be vendored: '{name}'")]
    #[diagnostic(code(vendorize::resolve::invalid_name))]
    InvalidPackageName { name: String },

    // File system errors
    #[error("Failed to clean output directory: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::clean_failed))]
    CleanFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::dir_create_failed))]
    DirCreateFailed { path: String, reason: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to read archive: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::archive_failed))]
    ArchiveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(vendorize::fs::io_error))]
    IoError { message: String },
}

impl VendorizeError {
    /// The fatal family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ManifestNotFound { .. }
            | Self::ManifestReadFailed { .. }
            | Self::ManifestParseFailed { .. }
            | Self::VendorizeKeyMissing { .. }
            | Self::ConfigInvalid { .. } => ErrorKind::Configuration,
            Self::PnpNotFound { .. }
            | Self::PnpStateInvalid { .. }
            | Self::OwnerNotFound { .. }
            | Self::PackageNotFound { .. }
            | Self::TransitiveNotFound { .. }
            | Self::InvalidPackageName { .. } => ErrorKind::Resolution,
            Self::CleanFailed { .. }
            | Self::DirCreateFailed { .. }
            | Self::FileReadFailed { .. }
            | Self::FileWriteFailed { .. }
            | Self::ArchiveFailed { .. }
            | Self::IoError { .. } => ErrorKind::Filesystem,
        }
    }
}

impl From<std::io::Error> for VendorizeError {
    fn from(err: std::io::Error) -> Self {
        fs::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for VendorizeError {
    fn from(err: serde_json::Error) -> Self {
        VendorizeError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VendorizeError>;

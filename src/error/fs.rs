//! File system errors
//!
//! Per-path I/O failures during the copy are built with [`fs_error!`](super::fs_error).

use super::{VendorizeError, impl_error_constructors};

impl_error_constructors! {
    /// Creates an error for an output directory that could not be removed
    clean_failed => CleanFailed { path, reason },
    /// Creates an error for an unreadable or malformed cache archive
    archive_failed => ArchiveFailed { path, reason },
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> VendorizeError {
    VendorizeError::IoError {
        message: message.into(),
    }
}

//! Copy engine shared by the executor: plain directory trees and cache archives.

pub mod archive;
pub mod fs;

use std::path::Path;

use crate::domain::PackageSource;
use crate::error::Result;

pub use fs::CopyOptions;

/// Copy a package's files from wherever the store keeps them into `dst`
pub fn copy_package_source(
    source: &PackageSource,
    dst: &Path,
    options: &CopyOptions,
) -> Result<usize> {
    match source {
        PackageSource::Directory(path) => fs::copy_tree(path, dst, options),
        PackageSource::Archive { archive, inner } => {
            archive::copy_archive_tree(archive, inner, dst, options)
        }
    }
}

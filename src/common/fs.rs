//! Recursive tree copy with exclusion rules
//!
//! Symlinks are followed: the vendor tree receives the contents of each
//! link target, never a link. Entries are visited in file-name order so two
//! copies of the same source produce the same tree.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, fs_error};

/// Entry names never vendored: nested resolution artifacts of the package
/// manager
pub const PACKAGE_METADATA_NAMES: &[&str] = &[
    "node_modules",
    ".yarn",
    ".pnp.cjs",
    ".pnp.loader.mjs",
    ".pnp.data.json",
];

#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn package_metadata() -> Self {
        Self {
            exclude: PACKAGE_METADATA_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }

    pub fn is_excluded(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.is_excluded_str(name))
    }

    pub fn is_excluded_str(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

/// Mirror `src` into `dst`, skipping excluded entries entirely.
///
/// Existing destination files are overwritten; files already in `dst` that
/// are absent from `src` are left alone. Returns the number of files copied.
///
/// # Errors
///
/// Any unreadable source entry or unwritable destination aborts the copy.
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions) -> Result<usize> {
    fs::create_dir_all(dst).map_err(|e| fs_error!(DirCreateFailed, dst.display(), e))?;

    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !options.is_excluded(entry.file_name()));

    let mut copied = 0;
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).display().to_string();
            fs_error!(FileReadFailed, path, e)
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| fs_error!(FileReadFailed, entry.path().display(), e))?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| fs_error!(DirCreateFailed, target.display(), e))?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)
                .map_err(|e| fs_error!(FileWriteFailed, target.display(), e))?;
            copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping special file");
        }
    }

    Ok(copied)
}

//! Copying package trees out of Yarn cache archives
//!
//! Cached packages live at `<archive>.zip/node_modules/<name>/`. Entries
//! below that inner directory are extracted in path order with the same
//! exclusion rules as [`copy_tree`](super::fs::copy_tree). Symlinked files
//! inside the archive are resolved and their target's bytes written.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path};

use zip::ZipArchive;

use super::fs::CopyOptions;
use crate::error::{Result, fs as fs_errors, fs_error};

const SYMLINK_MODE: u32 = 0o120_000;
const FILE_TYPE_MASK: u32 = 0o170_000;
#[cfg(unix)]
const PERMISSION_MASK: u32 = 0o777;

#[derive(Debug)]
struct ArchiveEntry {
    index: usize,
    name: String,
    relative: String,
    kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Symlink,
}

/// Extract the `inner` directory of `archive_path` into `dst`.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Fails on an unreadable archive, an entry escaping the destination, a
/// dangling symlink, or an unwritable destination.
pub fn copy_archive_tree(
    archive_path: &Path,
    inner: &str,
    dst: &Path,
    options: &CopyOptions,
) -> Result<usize> {
    let archive_display = archive_path.display().to_string();
    let fail = |reason: String| fs_errors::archive_failed(&archive_display, reason);

    let file = File::open(archive_path).map_err(|e| fail(e.to_string()))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;

    let entries = list_entries(&mut archive, inner, options).map_err(fail)?;
    fs::create_dir_all(dst).map_err(|e| fs_error!(DirCreateFailed, dst.display(), e))?;

    let mut copied = 0;
    for entry in &entries {
        let target = dst.join(&entry.relative);

        if entry.kind == EntryKind::Dir {
            fs::create_dir_all(&target)
                .map_err(|e| fs_error!(DirCreateFailed, target.display(), e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| fs_error!(DirCreateFailed, parent.display(), e))?;
        }

        let source_name = if entry.kind == EntryKind::Symlink {
            let link = read_entry_string(&mut archive, entry.index).map_err(fail)?;
            resolve_link(&entry.name, &link)
                .ok_or_else(|| fail(format!("symlink {} escapes the archive", entry.name)))?
        } else {
            entry.name.clone()
        };

        let mut source = archive
            .by_name(&source_name)
            .map_err(|e| fail(format!("{source_name}: {e}")))?;
        let mode = source.unix_mode();
        let mut out =
            File::create(&target).map_err(|e| fs_error!(FileWriteFailed, target.display(), e))?;
        io::copy(&mut source, &mut out)
            .map_err(|e| fs_error!(FileWriteFailed, target.display(), e))?;
        drop(out);
        apply_mode(&target, mode)?;
        copied += 1;
    }

    Ok(copied)
}

/// Give an extracted file the permission bits recorded in the archive
#[cfg(unix)]
fn apply_mode(target: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = mode.map_or(0, |mode| mode & PERMISSION_MASK);
    if permissions == 0 {
        return Ok(());
    }
    fs::set_permissions(target, fs::Permissions::from_mode(permissions))
        .map_err(|e| fs_error!(FileWriteFailed, target.display(), e))
}

#[cfg(not(unix))]
fn apply_mode(_target: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

/// Entries below `inner`, minus excluded names, sorted by relative path
fn list_entries<R: Read + io::Seek>(
    archive: &mut ZipArchive<R>,
    inner: &str,
    options: &CopyOptions,
) -> std::result::Result<Vec<ArchiveEntry>, String> {
    let inner = inner.trim_matches('/');
    let prefix = if inner.is_empty() {
        String::new()
    } else {
        format!("{inner}/")
    };

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(|e| e.to_string())?;
        let name = entry.name().to_string();

        let Some(relative) = name.strip_prefix(&prefix) else {
            continue;
        };
        let relative = relative.trim_end_matches('/');
        if relative.is_empty() {
            continue;
        }
        if relative.split('/').any(|part| options.is_excluded_str(part)) {
            continue;
        }
        let is_safe = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(format!("entry {name} escapes the package directory"));
        }

        let kind = if entry.is_dir() {
            EntryKind::Dir
        } else if entry
            .unix_mode()
            .is_some_and(|mode| mode & FILE_TYPE_MASK == SYMLINK_MODE)
        {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };

        entries.push(ArchiveEntry {
            index,
            relative: relative.to_string(),
            name,
            kind,
        });
    }

    entries.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(entries)
}

fn read_entry_string<R: Read + io::Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
) -> std::result::Result<String, String> {
    let mut entry = archive.by_index(index).map_err(|e| e.to_string())?;
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| e.to_string())?;
    Ok(content)
}

/// Resolve a relative link target against the directory of `entry_name`
fn resolve_link(entry_name: &str, target: &str) -> Option<String> {
    if target.starts_with('/') {
        return None;
    }

    let mut parts: Vec<&str> = entry_name.split('/').collect();
    parts.pop();

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}

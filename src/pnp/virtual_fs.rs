//! Mapping of Yarn virtual package locations to real paths
//!
//! Packages with peer dependencies get one virtual instance per set of peers.
//! Their locations point through a virtual folder that does not exist on
//! disk:
//!
//! ```text
//! <base>/__virtual__/<name>-virtual-<hash>/<depth>/<subpath>
//! ```
//!
//! The real location is `<base>`, `<depth>` levels further up, joined with
//! `<subpath>`. Older installs use `$$virtual` as the folder name.

use std::path::{Component, Path, PathBuf};

const VIRTUAL_DIRS: &[&str] = &["__virtual__", "$$virtual"];

/// Resolve every virtual folder in `path` to the real location it stands for.
///
/// Paths without a virtual folder, or with a malformed depth segment, are
/// returned unchanged.
pub fn resolve_virtual(path: &Path) -> PathBuf {
    let components: Vec<Component<'_>> = path.components().collect();
    let Some(marker) = components.iter().position(is_virtual_dir) else {
        return path.to_path_buf();
    };

    let mut target: PathBuf = components[..marker].iter().collect();
    match &components[marker + 1..] {
        [] | [_] => target,
        [_, depth, subpath @ ..] => {
            let Some(depth) = parse_depth(depth) else {
                return path.to_path_buf();
            };
            for _ in 0..depth {
                target.pop();
            }
            target.extend(subpath);
            resolve_virtual(&target)
        }
    }
}

fn is_virtual_dir(component: &Component<'_>) -> bool {
    matches!(component, Component::Normal(name)
        if name.to_str().is_some_and(|name| VIRTUAL_DIRS.contains(&name)))
}

fn parse_depth(component: &Component<'_>) -> Option<usize> {
    let Component::Normal(depth) = component else {
        return None;
    };
    let depth = depth.to_str()?;
    if depth.is_empty() || !depth.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    depth.parse().ok()
}

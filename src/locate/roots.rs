use super::{lower_name, Search, Strategy};
use crate::install::TerrariaInstall;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem roots as reported by the host.
///
/// Windows: every existing drive from `A:\` to `Z:\`. Elsewhere: `/`.
pub(super) fn host_roots() -> Vec<PathBuf> {
    if cfg!(windows) {
        (b'A'..=b'Z')
            .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
            .filter(|p| p.exists())
            .collect()
    } else {
        vec![PathBuf::from("/")]
    }
}

pub(super) fn search(cx: &mut Search<'_>) -> Option<TerrariaInstall> {
    let roots = cx.locator.roots.clone().unwrap_or_else(host_roots);

    for root in roots {
        let Some(children) = list_children(cx, &root) else {
            continue;
        };

        // "Program Files", "Games", ... may hold a Steam folder.
        for child in &children {
            let name = lower_name(child);
            if name.contains("program") || name.contains("game") {
                if let Some(install) = seek_steam_parent(cx, child) {
                    return Some(install);
                }
            }
        }

        // Steam folder straight under the root.
        if let Some(install) = seek_steam_parent(cx, &root) {
            return Some(install);
        }
    }
    None
}

/// Descend into every `*steam*` child of `parent`.
fn seek_steam_parent(cx: &mut Search<'_>, parent: &Path) -> Option<TerrariaInstall> {
    if !parent.is_dir() {
        return None;
    }
    let children = list_children(cx, parent)?;
    children
        .iter()
        .filter(|child| lower_name(child).contains("steam"))
        .find_map(|child| cx.seek_steam_directory(child))
}

fn list_children(cx: &mut Search<'_>, dir: &Path) -> Option<Vec<PathBuf>> {
    match fs::read_dir(dir) {
        Ok(entries) => Some(entries.filter_map(|e| e.ok()).map(|e| e.path()).collect()),
        Err(e) => {
            cx.note(Strategy::FilesystemRoots, Some(dir), format!("cannot list: {e}"));
            None
        }
    }
}

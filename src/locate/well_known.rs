use super::{Search, Strategy};
use crate::install::TerrariaInstall;
use std::path::PathBuf;

/// Default Steam install roots for the build target.
pub(super) fn default_steam_roots() -> Vec<PathBuf> {
    let mut out = Vec::new();

    #[cfg(target_os = "windows")]
    {
        out.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        out.push(PathBuf::from(r"C:\Program Files\Steam"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = dirs_next::home_dir() {
            out.push(home.join(".steam/steam"));
            out.push(home.join(".steam/root"));
            out.push(home.join(".local/share/Steam"));
            out.push(home.join(".var/app/com.valvesoftware.Steam/.steam/steam"));
            out.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs_next::home_dir() {
            out.push(home.join("Library/Application Support/Steam"));
        }
    }

    out
}

pub(super) fn search(cx: &mut Search<'_>) -> Option<TerrariaInstall> {
    let roots = cx
        .locator
        .well_known_roots
        .clone()
        .unwrap_or_else(default_steam_roots);

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        if let Some(install) = cx.seek_steam_directory(&root) {
            return Some(install);
        }
        cx.note(Strategy::WellKnown, Some(&root), "Steam found but no install below it");
    }
    None
}

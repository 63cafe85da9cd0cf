use crate::install::TerrariaInstall;
use crate::steam::consts::*;
use crate::steam::vdf::Vdf;
use std::fs;
use std::path::{Path, PathBuf};

/// First existing child of `parent` among `names`.
fn existing_child(parent: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| parent.join(name))
        .find(|p| p.exists())
}

/// The steamapps directory of a Steam base, if it has one.
pub(crate) fn steamapps_dir(steam_base: &Path) -> Option<PathBuf> {
    existing_child(steam_base, STEAMAPPS_DIR_NAMES)
}

/// Where the game folder would live for a Steam base.
///
/// `steam_base` is either a Steam root/library root (containing `SteamApps`)
/// or a `SteamApps` directory itself, in which case `Common` is looked up
/// directly inside it.
pub(crate) fn game_dir_candidate(steam_base: &Path, app_name: &str) -> PathBuf {
    let apps_root = steamapps_dir(steam_base).unwrap_or_else(|| steam_base.to_path_buf());
    let common = existing_child(&apps_root, COMMON_DIR_NAMES)
        .unwrap_or_else(|| apps_root.join(COMMON_DIR_NAMES[0]));
    common.join(app_name)
}

/// Look for the game below a Steam base directory.
///
/// Tries the base itself first, then every extra library listed in its
/// `libraryfolders.vdf`. Libraries are not followed recursively.
pub(crate) fn seek_steam_directory(steam_base: &Path, app_name: &str) -> Option<TerrariaInstall> {
    if !steam_base.is_dir() {
        return None;
    }

    if let Ok(install) = TerrariaInstall::new(game_dir_candidate(steam_base, app_name)) {
        return Some(install);
    }

    let apps_root = steamapps_dir(steam_base).unwrap_or_else(|| steam_base.to_path_buf());
    library_roots(&apps_root)
        .into_iter()
        .filter(|lib| lib.as_path() != steam_base && lib.is_dir())
        .find_map(|lib| TerrariaInstall::new(game_dir_candidate(&lib, app_name)).ok())
}

/// Extra library roots from `<steamapps>/libraryfolders.vdf` (best-effort).
pub(crate) fn library_roots(steamapps: &Path) -> Vec<PathBuf> {
    let path = steamapps.join(LIBRARY_FOLDERS_VDF);
    let Ok(txt) = fs::read_to_string(&path) else {
        return vec![];
    };
    match Vdf::parse(&txt) {
        Ok(vdf) => vdf.library_paths(),
        Err(e) => {
            log::debug!("ignoring unreadable {}: {e}", path.display());
            vec![]
        }
    }
}

use super::Search;
use crate::install::TerrariaInstall;

#[cfg(windows)]
pub(super) fn search(cx: &mut Search<'_>) -> Option<TerrariaInstall> {
    use super::Strategy;
    use std::path::PathBuf;
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    const STEAM_KEY: &str = r"Software\Valve\Steam";

    let hk = RegKey::predef(HKEY_CURRENT_USER);
    let steam = match hk.open_subkey(STEAM_KEY) {
        Ok(k) => k,
        Err(e) => {
            cx.note(Strategy::Registry, None, format!(r"HKCU\{STEAM_KEY}: {e}"));
            return None;
        }
    };

    // SteamPath is the install directory, SteamExe the client binary inside it.
    let mut bases: Vec<PathBuf> = Vec::new();
    match steam.get_value::<String, _>("SteamPath") {
        Ok(dir) => bases.push(PathBuf::from(dir.trim_matches('"'))),
        Err(e) => cx.note(Strategy::Registry, None, format!("SteamPath: {e}")),
    }
    if let Ok(exe) = steam.get_value::<String, _>("SteamExe") {
        if let Some(parent) = PathBuf::from(exe.trim_matches('"')).parent() {
            bases.push(parent.to_path_buf());
        }
    }

    for base in bases {
        if let Some(install) = cx.seek_steam_directory(&base) {
            return Some(install);
        }
        cx.note(Strategy::Registry, Some(&base), "no install below registered Steam path");
    }
    None
}

#[cfg(not(windows))]
pub(super) fn search(_cx: &mut Search<'_>) -> Option<TerrariaInstall> {
    None
}

/// Steam common install folder name for Terraria.
pub(crate) const TERRARIA_STEAM_GAME_DIR_NAME: &str = "Terraria";

/// Short names that also identify Terraria in environment variable names.
pub(crate) const TERRARIA_ALIASES: &[&str] = &["tapi"];

/// Spellings of Steam's per-library app directory, preferred first.
/// Windows installs write `SteamApps`, Linux/macOS write `steamapps`.
pub(crate) const STEAMAPPS_DIR_NAMES: &[&str] = &["SteamApps", "steamapps"];
pub(crate) const COMMON_DIR_NAMES: &[&str] = &["Common", "common"];

/// Lists additional library roots, lives inside the steamapps directory.
pub(crate) const LIBRARY_FOLDERS_VDF: &str = "libraryfolders.vdf";


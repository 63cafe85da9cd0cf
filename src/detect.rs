use crate::install::TerrariaInstall;
use crate::locate::{Discovery, Locator};

/// Locate the Terraria install on this host (best-effort).
///
/// This uses, in order:
/// - the Steam path from the registry (Windows only)
/// - `*program*`/`*game*` folders and `*steam*` folders below each filesystem root
/// - environment variables naming Terraria (or `tapi`) or Steam
/// - Steam's default install locations
///
/// Returns `None` when nothing matches; callers should then ask the user.
pub fn find_install_directory() -> Option<TerrariaInstall> {
    Locator::new().find()
}

/// Same search as [`find_install_directory`], keeping the diagnostics.
pub fn locate_install() -> Discovery {
    Locator::new().locate()
}

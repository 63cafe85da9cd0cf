use super::{Search, Strategy};
use crate::install::TerrariaInstall;
use std::path::PathBuf;

pub(super) fn search(cx: &mut Search<'_>) -> Option<TerrariaInstall> {
    let vars = match &cx.locator.env {
        Some(vars) => vars.clone(),
        None => std::env::vars_os().collect(),
    };

    let mut needles = vec![cx.app_name().to_lowercase()];
    needles.extend(cx.locator.aliases.iter().map(|a| a.to_lowercase()));

    for (key, value) in vars {
        let key = key.to_string_lossy().to_lowercase();
        let candidate = PathBuf::from(&value);

        if needles.iter().any(|n| !n.is_empty() && key.contains(n.as_str())) {
            // Points at the install directory itself.
            match TerrariaInstall::new(&candidate) {
                Ok(install) => return Some(install),
                Err(e) => cx.note(Strategy::Environment, Some(&candidate), e.to_string()),
            }
        } else if key.contains("steam") {
            if let Some(install) = cx.seek_steam_directory(&candidate) {
                return Some(install);
            }
            cx.note(
                Strategy::Environment,
                Some(&candidate),
                format!("no install below ${}", key.to_uppercase()),
            );
        }
    }
    None
}

//! Best-effort search for a Steam-installed Terraria directory.
//!
//! Strategies run in a fixed order and the first valid install wins:
//! registry (Windows only), filesystem roots, environment variables, then
//! Steam's well-known default locations. No strategy can fail the search;
//! faults are recorded as [`Diagnostic`]s and logged at debug level.

use crate::install::TerrariaInstall;
use crate::platform::Platform;
use crate::steam::consts::{TERRARIA_ALIASES, TERRARIA_STEAM_GAME_DIR_NAME};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

mod env;
mod registry;
mod roots;
mod well_known;

/// One step of the search chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Steam install path recorded in the Windows registry.
    Registry,
    /// `program*`/`game*`/`steam*` folders below each filesystem root.
    FilesystemRoots,
    /// Environment variables naming the game or Steam.
    Environment,
    /// Steam's default install locations.
    WellKnown,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Registry => "registry",
            Strategy::FilesystemRoots => "filesystem roots",
            Strategy::Environment => "environment",
            Strategy::WellKnown => "well-known locations",
        })
    }
}

/// A fault or dead end hit by a strategy. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Strategy that produced it.
    pub strategy: Strategy,
    /// Path involved, when there is one.
    pub path: Option<PathBuf>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "[{}] {}: {}", self.strategy, p.display(), self.message),
            None => write!(f, "[{}] {}", self.strategy, self.message),
        }
    }
}

/// Outcome of a search: the install (if any) plus everything that went wrong on the way.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// First valid install found.
    pub install: Option<TerrariaInstall>,
    /// Strategy that found it.
    pub found_by: Option<Strategy>,
    /// Soft faults collected across all strategies that ran.
    pub diagnostics: Vec<Diagnostic>,
}

/// Configurable install search.
///
/// [`Locator::new`] searches the real host. Individual inputs can be replaced,
/// which is how tests point the search at a synthetic tree.
#[derive(Debug, Clone)]
pub struct Locator {
    app_name: String,
    aliases: Vec<String>,
    platform: Platform,
    registry: bool,
    roots: Option<Vec<PathBuf>>,
    env: Option<Vec<(OsString, OsString)>>,
    well_known: bool,
    well_known_roots: Option<Vec<PathBuf>>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator {
    /// Search the host for Terraria with every strategy enabled.
    pub fn new() -> Self {
        Self {
            app_name: TERRARIA_STEAM_GAME_DIR_NAME.to_string(),
            aliases: TERRARIA_ALIASES.iter().map(|a| a.to_string()).collect(),
            platform: Platform::current(),
            registry: true,
            roots: None,
            env: None,
            well_known: true,
            well_known_roots: None,
        }
    }

    /// Folder name below `SteamApps/Common` (also matched in env var names).
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Add a short name that identifies the game in environment variable names.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Enable or disable the registry lookup. It only ever runs on Windows.
    pub fn registry(mut self, enabled: bool) -> Self {
        self.registry = enabled;
        self
    }

    /// Replace the host's filesystem roots.
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the process environment.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Enable or disable the well-known Steam locations step.
    pub fn well_known(mut self, enabled: bool) -> Self {
        self.well_known = enabled;
        self
    }

    /// Replace the well-known Steam roots.
    pub fn well_known_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.well_known_roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Run the search and return the first valid install.
    pub fn find(&self) -> Option<TerrariaInstall> {
        self.locate().install
    }

    /// Run the search, keeping the diagnostics.
    pub fn locate(&self) -> Discovery {
        let mut search = Search {
            locator: self,
            diagnostics: Vec::new(),
        };

        let chain: [(Strategy, bool, StrategyFn); 4] = [
            (
                Strategy::Registry,
                self.registry && self.platform.is_windows(),
                registry::search,
            ),
            (Strategy::FilesystemRoots, true, roots::search),
            (Strategy::Environment, true, env::search),
            (Strategy::WellKnown, self.well_known, well_known::search),
        ];

        for (strategy, enabled, run) in chain {
            if !enabled {
                continue;
            }
            log::debug!("searching for {} via {strategy}", self.app_name);
            if let Some(install) = run(&mut search) {
                log::info!(
                    "found {} install via {strategy}: {}",
                    self.app_name,
                    install.dir().display()
                );
                return Discovery {
                    install: Some(install),
                    found_by: Some(strategy),
                    diagnostics: search.diagnostics,
                };
            }
        }

        log::info!("no {} install found", self.app_name);
        Discovery {
            install: None,
            found_by: None,
            diagnostics: search.diagnostics,
        }
    }
}

type StrategyFn = fn(&mut Search<'_>) -> Option<TerrariaInstall>;

/// Per-run state shared by the strategies.
struct Search<'a> {
    locator: &'a Locator,
    diagnostics: Vec<Diagnostic>,
}

impl Search<'_> {
    fn app_name(&self) -> &str {
        &self.locator.app_name
    }

    fn note(&mut self, strategy: Strategy, path: Option<&Path>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            strategy,
            path: path.map(Path::to_path_buf),
            message: message.into(),
        };
        log::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn seek_steam_directory(&self, steam_base: &Path) -> Option<TerrariaInstall> {
        crate::steam::paths::seek_steam_directory(steam_base, self.app_name())
    }
}

/// Lowercased file name of a path, for substring heuristics.
fn lower_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

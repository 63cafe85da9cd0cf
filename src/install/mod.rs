use crate::error::{Result, TextractError};
use std::path::{Path, PathBuf};

/// Marker child directory that identifies a Terraria install.
pub const CONTENT_DIR_NAME: &str = "Content";

/// A validated Terraria installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrariaInstall {
    dir: PathBuf,
}

impl TerrariaInstall {
    /// Create and validate an install from a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !is_valid_install(&dir) {
            return Err(TextractError::InvalidInstallDir { path: dir });
        }
        Ok(Self { dir })
    }

    /// Install directory (the one containing `Content`).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The `Content` directory holding the game's assets.
    pub fn content_dir(&self) -> PathBuf {
        self.dir.join(CONTENT_DIR_NAME)
    }

    /// Consume the handle, returning the install directory.
    pub fn into_path(self) -> PathBuf {
        self.dir
    }
}

/// True if `dir` is a directory with an immediate `Content` subdirectory.
///
/// The name comparison follows the filesystem: exact on case-sensitive
/// filesystems, case-insensitive elsewhere.
pub fn is_valid_install(dir: &Path) -> bool {
    dir.is_dir() && dir.join(CONTENT_DIR_NAME).is_dir()
}

use std::path::PathBuf;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, TextractError>;

/// Error type for `textract-host`.
#[derive(thiserror::Error, Debug)]
pub enum TextractError {
    /// Directory is missing, not a directory, or lacks a `Content` child.
    #[error("invalid Terraria install directory: {path} (expected a 'Content' directory inside)")]
    InvalidInstallDir {
        /// Path that failed validation.
        path: PathBuf,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion failed (only used for internal parsing needs).
    #[error("utf-8 conversion error")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Steam configuration parsing error.
    #[error("steam config error: {message}")]
    SteamConfig {
        /// Human-readable message.
        message: String,
    },

    /// Spawn failed.
    #[error("failed to run {program}")]
    Spawn {
        /// Program that could not be run.
        program: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The ffmpeg payload shipped with the application could not be found.
    ///
    /// This is a packaging defect; the transcoder cannot work without it.
    #[error("bundled ffmpeg executable not found (looked in: {searched})")]
    BundledExecutableMissing {
        /// Locations that were checked, for the error message.
        searched: String,
    },
}

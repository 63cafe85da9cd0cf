use crate::error::{Result, TextractError};
use crate::platform::path::normalize_path;
use crate::platform::Platform;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Command name used when relying on the host's `PATH`.
pub const FFMPEG_COMMAND: &str = "ffmpeg";

/// Name of the bundled Windows payload and of the cwd fallback copy.
pub const FFMPEG_EXE_NAME: &str = "ffmpeg.exe";

/// Explicit ffmpeg executable, skips provisioning.
pub const ENV_FFMPEG: &str = "TEXTRACT_FFMPEG";

/// Location of the bundled payload, overrides the lookup next to the executable.
pub const ENV_FFMPEG_RESOURCE: &str = "TEXTRACT_FFMPEG_RESOURCE";

/// The ffmpeg every conversion runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableRef {
    /// Bare command name resolved through the host's command search path.
    Command(String),
    /// Absolute path to a specific executable (usually a materialized copy).
    Path(PathBuf),
}

impl ExecutableRef {
    /// Program to hand to the OS.
    pub fn program(&self) -> PathBuf {
        match self {
            ExecutableRef::Command(name) => PathBuf::from(name),
            ExecutableRef::Path(p) => p.clone(),
        }
    }
}

impl fmt::Display for ExecutableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutableRef::Command(name) => write!(f, "{name} (from PATH)"),
            ExecutableRef::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Where the Windows ffmpeg payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundledPayload {
    /// Embedded in the binary, e.g. with `include_bytes!`.
    Bytes(&'static [u8]),
    /// A file shipped alongside the application.
    File(PathBuf),
}

/// Provisioning settings for a [`Transcoder`](super::Transcoder).
#[derive(Debug, Clone)]
pub struct TranscoderConfig {
    platform: Platform,
    executable: Option<PathBuf>,
    payload: Option<BundledPayload>,
    temp_dir: Option<PathBuf>,
    fallback_path: PathBuf,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscoderConfig {
    /// Host platform, bundled payload looked up next to the current executable.
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            executable: None,
            payload: None,
            temp_dir: None,
            fallback_path: PathBuf::from(FFMPEG_EXE_NAME),
        }
    }

    /// [`TranscoderConfig::new`] plus the `TEXTRACT_FFMPEG` and
    /// `TEXTRACT_FFMPEG_RESOURCE` overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Like [`TranscoderConfig::from_env`], reading variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut cfg = Self::new();
        if let Some(p) = var(ENV_FFMPEG) {
            cfg.executable = Some(PathBuf::from(p));
        }
        if let Some(p) = var(ENV_FFMPEG_RESOURCE) {
            cfg.payload = Some(BundledPayload::File(PathBuf::from(p)));
        }
        cfg
    }

    /// Provision as if running on `platform`.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Use this executable as-is, on every platform.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Bundled payload embedded in the binary.
    pub fn bundled_bytes(mut self, bytes: &'static [u8]) -> Self {
        self.payload = Some(BundledPayload::Bytes(bytes));
        self
    }

    /// Bundled payload shipped as a file.
    pub fn bundled_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.payload = Some(BundledPayload::File(path.into()));
        self
    }

    /// Directory for the materialized copy. Defaults to the system temp dir.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Where to put the copy when no temp file can be created.
    /// Relative paths are taken from the current working directory.
    pub fn fallback_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_path = path.into();
        self
    }
}

/// Decide which ffmpeg to run, materializing the bundled copy on Windows.
///
/// Only a missing payload is an error. A failed copy is logged and falls back
/// to the `ffmpeg` on `PATH`.
pub(crate) fn provision(cfg: &TranscoderConfig) -> Result<ExecutableRef> {
    if let Some(p) = &cfg.executable {
        log::debug!("using configured ffmpeg: {}", p.display());
        return Ok(ExecutableRef::Path(p.clone()));
    }

    // Elsewhere ffmpeg has to be installed by the user.
    if !cfg.platform.is_windows() {
        return Ok(ExecutableRef::Command(FFMPEG_COMMAND.to_string()));
    }

    let payload = resolve_payload(cfg)?;

    match materialize(cfg, &payload) {
        Ok(target) => {
            log::debug!("materialized ffmpeg at {}", target.display());
            Ok(ExecutableRef::Path(target))
        }
        Err((target, e)) => {
            log::error!(
                "failed to copy ffmpeg executable to {}: {e}; falling back to '{FFMPEG_COMMAND}'",
                target.display()
            );
            Ok(ExecutableRef::Command(FFMPEG_COMMAND.to_string()))
        }
    }
}

fn resolve_payload(cfg: &TranscoderConfig) -> Result<BundledPayload> {
    match &cfg.payload {
        Some(BundledPayload::File(p)) if !p.is_file() => {
            Err(TextractError::BundledExecutableMissing {
                searched: p.display().to_string(),
            })
        }
        Some(payload) => Ok(payload.clone()),
        None => first_existing_payload(&default_payload_candidates()),
    }
}

fn first_existing_payload(candidates: &[PathBuf]) -> Result<BundledPayload> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .map(|p| BundledPayload::File(p.clone()))
        .ok_or_else(|| TextractError::BundledExecutableMissing {
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// `ffmpeg.exe` and `resources/ffmpeg.exe` next to the running binary.
fn default_payload_candidates() -> Vec<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(payload_candidates_in))
        .unwrap_or_default()
}

fn payload_candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join(FFMPEG_EXE_NAME),
        dir.join("resources").join(FFMPEG_EXE_NAME),
    ]
}

/// Write the payload to a fresh `ffmpeg*.exe` temp file that outlives the
/// process, or to the fallback path when no temp file can be created.
///
/// The temp file is only kept once the payload is fully written. On failure
/// the error comes back with the path that was being written.
fn materialize(
    cfg: &TranscoderConfig,
    payload: &BundledPayload,
) -> std::result::Result<PathBuf, (PathBuf, io::Error)> {
    let dir = cfg.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
    let created = tempfile::Builder::new()
        .prefix("ffmpeg")
        .suffix(".exe")
        .tempfile_in(&dir);

    match created {
        Ok(mut file) => {
            let path = file.path().to_path_buf();
            if let Err(e) = write_payload(payload, file.as_file_mut()) {
                return Err((path, e));
            }
            match file.keep() {
                Ok(_) => Ok(path),
                Err(e) => Err((path, e.error)),
            }
        }
        Err(e) => {
            log::debug!("cannot create temp file in {}: {e}", dir.display());
            let path = normalize_path(&cfg.fallback_path);
            match fs::File::create(&path).and_then(|mut f| write_payload(payload, &mut f)) {
                Ok(()) => Ok(path),
                Err(e) => Err((path, e)),
            }
        }
    }
}

fn write_payload(payload: &BundledPayload, dest: &mut fs::File) -> io::Result<()> {
    match payload {
        BundledPayload::Bytes(bytes) => dest.write_all(bytes),
        BundledPayload::File(src) => io::copy(&mut fs::File::open(src)?, dest).map(|_| ()),
    }
}

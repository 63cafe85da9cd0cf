//! ffmpeg invocation for extracted audio.
//!
//! Every conversion is a blocking `ffmpeg` child process writing 16-bit PCM.
//! The executable is provisioned once per [`Transcoder`]: on Windows a bundled
//! copy is materialized to disk, elsewhere `ffmpeg` must be on `PATH`.

use crate::command::{forward_output, CommandSpec};
use crate::error::Result;
use crate::platform::path::normalize_path;
use once_cell::sync::{Lazy, OnceCell};
use std::ffi::OsString;
use std::path::Path;

mod provision;

pub use provision::{
    BundledPayload, ExecutableRef, TranscoderConfig, ENV_FFMPEG, ENV_FFMPEG_RESOURCE,
    FFMPEG_COMMAND, FFMPEG_EXE_NAME,
};

static GLOBAL: Lazy<Transcoder> = Lazy::new(|| Transcoder::new(TranscoderConfig::from_env()));

/// Exit information of one ffmpeg run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// Exit code, `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    /// True when ffmpeg exited with status 0.
    pub success: bool,
}

/// Runs ffmpeg conversions with a lazily provisioned executable.
#[derive(Debug)]
pub struct Transcoder {
    config: TranscoderConfig,
    executable: OnceCell<ExecutableRef>,
}

impl Transcoder {
    /// Create a transcoder. Provisioning happens on first use.
    pub fn new(config: TranscoderConfig) -> Self {
        Self {
            config,
            executable: OnceCell::new(),
        }
    }

    /// Create a transcoder and provision its executable right away.
    pub fn provisioned(config: TranscoderConfig) -> Result<Self> {
        let t = Self::new(config);
        t.executable()?;
        Ok(t)
    }

    /// Process-wide transcoder configured from the environment.
    pub fn global() -> &'static Transcoder {
        &GLOBAL
    }

    /// The executable all conversions use, provisioning it on first call.
    ///
    /// Concurrent first calls block until one of them has finished, so the
    /// bundled copy is written at most once. A missing bundled payload is
    /// returned as an error and retried on the next call.
    pub fn executable(&self) -> Result<&ExecutableRef> {
        self.executable
            .get_or_try_init(|| provision::provision(&self.config))
    }

    /// Command line for converting `input` into `output`.
    pub fn command(&self, input: &Path, output: &Path) -> Result<CommandSpec> {
        Ok(CommandSpec {
            program: self.executable()?.program(),
            args: conversion_args(input, output),
        })
    }

    /// Convert `input` into a 16-bit PCM `output`, reporting how ffmpeg exited.
    ///
    /// ffmpeg's stderr and stdout are forwarded to ours once it exits. A
    /// non-zero exit is logged ahead of that output and returned as an
    /// unsuccessful outcome, not an error.
    pub fn try_convert(&self, input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let spec = self.command(input, output)?;
        log::debug!(
            "running {} on {} -> {}",
            spec.program.display(),
            input.display(),
            output.display()
        );

        let child = spec.run()?;
        let outcome = ConversionOutcome {
            exit_code: child.status.code(),
            success: child.status.success(),
        };
        if !outcome.success {
            match outcome.exit_code {
                Some(code) => log::warn!(
                    "ffmpeg exited with abnormal exit code {code} converting {}",
                    input.display()
                ),
                None => log::warn!(
                    "ffmpeg was terminated by a signal converting {}",
                    input.display()
                ),
            }
        }
        forward_output(&child)?;
        Ok(outcome)
    }

    /// Best-effort conversion: failures are logged, never returned.
    pub fn convert(&self, input: &Path, output: &Path) {
        if let Err(e) = self.try_convert(input, output) {
            log::error!(
                "error while running ffmpeg on {}: {}",
                input.display(),
                error_chain(&e)
            );
        }
    }
}

/// Convert with the process-wide [`Transcoder`]. Never fails; see [`Transcoder::convert`].
pub fn convert(input: &Path, output: &Path) {
    Transcoder::global().convert(input, output)
}

/// `-i <input> -acodec pcm_s16le -nostdin -ab 128k <output>`, paths normalized.
pub fn conversion_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-i".into(),
        normalize_path(input).into_os_string(),
        "-acodec".into(),
        "pcm_s16le".into(),
        "-nostdin".into(),
        "-ab".into(),
        "128k".into(),
        normalize_path(output).into_os_string(),
    ]
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        source = inner.source();
    }
    out
}

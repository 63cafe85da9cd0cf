use crate::error::{Result, TextractError};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// A run-ready command description (testable without executing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments passed to the executable.
    pub args: Vec<OsString>,
}

impl CommandSpec {
    /// Run to completion, capturing the child's stderr and stdout.
    ///
    /// Blocks until the child exits. Both pipes are drained while waiting, so
    /// a chatty child cannot fill a pipe buffer and stall. There is no timeout.
    pub fn run(&self) -> Result<Output> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TextractError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

/// Write a finished child's stderr, then its stdout, to ours.
pub(crate) fn forward_output(output: &Output) -> Result<()> {
    std::io::stderr().write_all(&output.stderr)?;
    std::io::stdout().write_all(&output.stdout)?;
    Ok(())
}

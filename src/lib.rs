#![doc = r#"
`textract-host` finds a Steam-installed Terraria and runs ffmpeg for TExtract.

Core capabilities:
- Locate the Terraria install directory (the one containing `Content`)
  without user input, degrading gracefully when a source is unavailable
- Convert extracted audio to 16-bit PCM with ffmpeg, provisioning a bundled
  ffmpeg on Windows

Nothing here prompts the user. When [`find_install_directory`] returns
`None`, asking for a path is up to the caller.
"#]

mod command;
mod detect;
mod error;
pub mod ffmpeg;
mod install;
pub mod locate;
mod platform;
mod steam;

pub use crate::command::CommandSpec;
pub use crate::detect::{find_install_directory, locate_install};
pub use crate::error::{Result, TextractError};
pub use crate::ffmpeg::{convert, ConversionOutcome, Transcoder, TranscoderConfig};
pub use crate::install::{is_valid_install, TerrariaInstall, CONTENT_DIR_NAME};
pub use crate::locate::{Discovery, Locator, Strategy};
pub use crate::platform::Platform;

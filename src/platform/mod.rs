//! Host platform context.

pub(crate) mod path;

/// Host OS family, as far as discovery and provisioning care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows-family host: registry lookup and bundled ffmpeg are eligible.
    Windows,
    /// Any other host: ffmpeg must be on `PATH`.
    Other,
}

impl Platform {
    /// Platform of the running process. Fixed for the lifetime of the process.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// True for [`Platform::Windows`].
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

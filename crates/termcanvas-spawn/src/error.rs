use std::path::PathBuf;

use thiserror::Error;

/// Every terminal product a canvas can be spawned into.
pub const SUPPORTED_TERMINALS: &[&str] = &[
    "tmux",
    "iTerm2",
    "Apple Terminal",
    "WezTerm",
    "Kitty",
    "Alacritty",
    "VS Code terminal",
    "Ghostty",
];

/// Session registry I/O failure, with the file it happened on.
#[derive(Error, Debug)]
#[error("Session registry I/O failed at {path}: {source}")]
pub struct RegistryError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Error, Debug)]
pub enum SpawnError {
    /// Classification came back empty. Fatal: no backend is attempted.
    #[error(
        "No supported terminal detected. termcanvas can spawn into: \
         tmux, iTerm2, Apple Terminal, WezTerm, Kitty, Alacritty, VS Code terminal, Ghostty"
    )]
    UnsupportedTerminal,

    /// The selected backend's creation primitive failed. No second
    /// backend is attempted.
    #[error("{backend} could not create a canvas session: {reason}")]
    CreateFailed {
        backend: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to stage canvas config at {path}: {source}")]
    ConfigHandoff {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpawnError {
    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            SpawnError::UnsupportedTerminal => {
                "Run this from inside a supported terminal, or check 'termcanvas env' to see \
                 what was detected."
                    .to_string()
            }
            SpawnError::CreateFailed { backend, .. } => format!(
                "Check that {} is installed and controllable from this shell.",
                backend
            ),
            SpawnError::Registry(_) | SpawnError::ConfigHandoff { .. } => {
                "Check that the temp directory is writable, or point TERMCANVAS_SOCKET_DIR \
                 somewhere that is."
                    .to_string()
            }
        }
    }

    /// Converts to a UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpawnError::UnsupportedTerminal => 69, // EX_UNAVAILABLE
            SpawnError::CreateFailed { .. } => 74, // EX_IOERR
            SpawnError::Registry(_) | SpawnError::ConfigHandoff { .. } => 74,
        }
    }
}

//! Persisted cross-invocation session identity.
//!
//! One plaintext file per backend kind in a shared directory, holding a
//! single opaque identifier. Empty content means "no session". Writes
//! replace the file wholesale and `clear` writes an empty string rather
//! than deleting, so path existence carries no meaning. There is no
//! locking: two invocations racing on the same kind can interleave reads
//! and writes. That race is documented and deliberately left unfixed;
//! the injectable trait is where a locking store would plug in.

use std::path::PathBuf;

use crate::error::RegistryError;

/// Identity slot per backend. The variant names say what the stored
/// value is: a pane id, a window id, a session id, or a pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    TmuxPane,
    ItermSession,
    TerminalWindow,
    WeztermPane,
    KittyWindow,
    AlacrittyPid,
    EmbeddedPid,
    GhosttyPid,
}

impl BackendKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            BackendKind::TmuxPane => "canvas-tmux-pane",
            BackendKind::ItermSession => "canvas-iterm-session",
            BackendKind::TerminalWindow => "canvas-terminal-window",
            BackendKind::WeztermPane => "canvas-wezterm-pane",
            BackendKind::KittyWindow => "canvas-kitty-window",
            BackendKind::AlacrittyPid => "canvas-alacritty-pid",
            BackendKind::EmbeddedPid => "canvas-embedded-pid",
            BackendKind::GhosttyPid => "canvas-ghostty-pid",
        }
    }
}

/// Injectable session-handle store, one identifier slot per backend kind.
pub trait SessionStore: Send + Sync {
    /// Read the persisted handle; empty string means no session.
    fn read(&self, kind: BackendKind) -> String;

    /// Overwrite the handle wholesale.
    fn write(&self, kind: BackendKind, handle: &str) -> Result<(), RegistryError>;

    /// Forget the handle by writing an empty string.
    fn clear(&self, kind: BackendKind) -> Result<(), RegistryError>;
}

/// File-backed store in the shared socket/state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at the machine-wide shared directory, so handles
    /// survive across separate invocations.
    pub fn shared() -> Self {
        Self::new(termcanvas_ipc::socket_dir())
    }

    fn path(&self, kind: BackendKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl SessionStore for FileStore {
    fn read(&self, kind: BackendKind) -> String {
        std::fs::read_to_string(self.path(kind))
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    fn write(&self, kind: BackendKind, handle: &str) -> Result<(), RegistryError> {
        let path = self.path(kind);
        std::fs::write(&path, handle).map_err(|source| RegistryError { path, source })
    }

    fn clear(&self, kind: BackendKind) -> Result<(), RegistryError> {
        self.write(kind, "")
    }
}

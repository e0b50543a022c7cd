//! Spawn orchestration: detect → build command → one backend → drive.
//!
//! The exclusive classification is trusted outright: exactly one backend
//! is selected and attempted per call, and its failure is the call's
//! failure. No second backend is raced or retried.

use std::path::PathBuf;

use tracing::debug;

use crate::backend;
use crate::backend::Backend;
use crate::backend::SpawnResult;
use crate::command::build_show_command;
use crate::detect::detect;
use crate::detect::TerminalApp;
use crate::error::SpawnError;
use crate::registry::SessionStore;

#[derive(Debug, Default)]
pub struct SpawnOptions {
    pub socket_path: Option<PathBuf>,
    pub scenario: Option<String>,
}

fn backend_for(app: TerminalApp) -> Option<Box<dyn Backend>> {
    match app {
        TerminalApp::Tmux => Some(Box::new(backend::TmuxBackend)),
        TerminalApp::Iterm => Some(Box::new(backend::ItermBackend)),
        TerminalApp::Kitty => Some(Box::new(backend::KittyBackend)),
        TerminalApp::Wezterm => Some(Box::new(backend::WeztermBackend)),
        TerminalApp::Alacritty => Some(Box::new(backend::AlacrittyBackend)),
        TerminalApp::Embedded => Some(Box::new(backend::EmbeddedBackend)),
        TerminalApp::Ghostty => Some(Box::new(backend::GhosttyBackend)),
        TerminalApp::AppleTerminal => Some(Box::new(backend::AppleTerminalBackend)),
        TerminalApp::None => None,
    }
}

/// Locate or create a terminal session and run the canvas command in it.
pub async fn spawn_canvas(
    kind: &str,
    id: &str,
    config: Option<&str>,
    options: SpawnOptions,
    store: &dyn SessionStore,
) -> Result<SpawnResult, SpawnError> {
    let environment = detect();
    debug!(summary = %environment.summary(), "detected terminal environment");

    let command = build_show_command(
        kind,
        id,
        config,
        options.socket_path.as_deref(),
        options.scenario.as_deref(),
    )?;

    let backend = backend_for(environment.app).ok_or(SpawnError::UnsupportedTerminal)?;
    debug!(backend = backend.name(), %command, "driving backend");

    backend::drive(backend.as_ref(), store, &command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SUPPORTED_TERMINALS;
    use crate::registry::mock::MockStore;

    #[test]
    fn test_every_classification_maps_to_one_backend() {
        let apps = [
            (TerminalApp::Tmux, "tmux"),
            (TerminalApp::Iterm, "iterm"),
            (TerminalApp::Kitty, "kitty"),
            (TerminalApp::Wezterm, "wezterm"),
            (TerminalApp::Alacritty, "alacritty"),
            (TerminalApp::Embedded, "embedded"),
            (TerminalApp::Ghostty, "ghostty"),
            (TerminalApp::AppleTerminal, "apple-terminal"),
        ];
        for (app, name) in apps {
            assert_eq!(backend_for(app).unwrap().name(), name);
        }
        assert!(backend_for(TerminalApp::None).is_none());
    }

    #[tokio::test]
    async fn test_no_terminal_environment_fails_naming_all_products() {
        // Scrub every detection marker so classification is "none".
        for var in [
            "TMUX",
            "TERM_PROGRAM",
            "TERM",
            "ITERM_SESSION_ID",
            "WEZTERM_PANE",
            "KITTY_WINDOW_ID",
            "ALACRITTY_WINDOW_ID",
            "GHOSTTY_RESOURCES_DIR",
        ] {
            std::env::remove_var(var);
        }

        let store = MockStore::new();
        let err = spawn_canvas("calendar", "e2e-none", None, SpawnOptions::default(), &store)
            .await
            .unwrap_err();

        assert!(matches!(err, SpawnError::UnsupportedTerminal));
        let message = err.to_string();
        for product in SUPPORTED_TERMINALS {
            assert!(message.contains(product), "message missing {}", product);
        }
        assert!(store.writes().is_empty());
    }
}

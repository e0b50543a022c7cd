//! Backend adapters: one per supported terminal product, driven through
//! a single verify → reuse-or-create lifecycle.
//!
//! Probe and reuse failures are recovered locally (clear the handle, fall
//! through to creation) and never surfaced; only creation failure
//! propagates. Automation failures at probe time — a missing CLI, a
//! scripting permission prompt — uniformly read as "session not found",
//! trading transient external-tool errors for a fresh session.

mod alacritty;
mod apple_terminal;
mod embedded;
mod ghostty;
mod iterm;
mod kitty;
mod tmux;
mod wezterm;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use tracing::warn;

use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;
use crate::registry::SessionStore;

pub use alacritty::AlacrittyBackend;
pub use apple_terminal::AppleTerminalBackend;
pub use embedded::EmbeddedBackend;
pub use ghostty::GhosttyBackend;
pub use iterm::ItermBackend;
pub use kitty::KittyBackend;
pub use tmux::TmuxBackend;
pub use wezterm::WeztermBackend;

/// Settle delay between sending an interrupt and retyping a command.
///
/// An empirical guess, not an acknowledged rendezvous: nothing confirms
/// the target shell has regained its prompt. Tunable, not a correctness
/// guarantee.
pub const INTERRUPT_SETTLE_MS: u64 = 150;

pub(crate) async fn settle() {
    tokio::time::sleep(Duration::from_millis(INTERRUPT_SETTLE_MS)).await;
}

/// Outcome of one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnResult {
    /// Backend name the canvas ended up in.
    pub method: &'static str,
    /// Pid of the spawned process, for backends whose identity is a pid.
    pub pid: Option<u32>,
}

/// What a backend's creation primitive produced.
#[derive(Debug, Default)]
pub struct Created {
    /// Identifier to persist, if the backend captured one.
    pub handle: Option<String>,
    pub pid: Option<u32>,
}

/// One terminal product's verify/reuse/create protocol.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &'static str;

    fn store_kind(&self) -> BackendKind;

    /// Liveness check for a persisted handle. Any tool failure is "not
    /// live".
    async fn probe(&self, handle: &str) -> bool;

    /// Re-drive the live session with `command`. Returns false when the
    /// transport failed or the backend cannot reuse (pid-identity
    /// backends terminate the old process here and decline).
    async fn reuse(&self, handle: &str, command: &str) -> bool;

    /// Create a fresh session running `command`.
    async fn create(&self, command: &str) -> Result<Created, SpawnError>;
}

/// Drives one backend through the lifecycle:
/// read handle → probe → reuse | clear + create → persist new handle.
pub async fn drive(
    backend: &dyn Backend,
    store: &dyn SessionStore,
    command: &str,
) -> Result<SpawnResult, SpawnError> {
    let kind = backend.store_kind();
    let handle = store.read(kind);

    if !handle.is_empty() {
        if backend.probe(&handle).await {
            debug!(backend = backend.name(), %handle, "session live, reusing");
            if backend.reuse(&handle, command).await {
                return Ok(SpawnResult {
                    method: backend.name(),
                    pid: None,
                });
            }
            warn!(backend = backend.name(), %handle, "reuse failed, recreating");
        } else {
            debug!(backend = backend.name(), %handle, "stale handle, recreating");
        }
        store.clear(kind)?;
    }

    let created = backend.create(command).await?;
    if let Some(new_handle) = &created.handle {
        store.write(kind, new_handle)?;
    }

    Ok(SpawnResult {
        method: backend.name(),
        pid: created.pid,
    })
}

/// Shared probe for pid-identity backends.
pub(crate) fn pid_handle_alive(handle: &str) -> bool {
    handle
        .parse::<u32>()
        .map(exec::process_alive)
        .unwrap_or(false)
}

/// Shared "reuse" for pid-identity backends: terminate the old process
/// and decline, so the driver falls through to creation.
pub(crate) fn terminate_and_decline(handle: &str) -> bool {
    if let Ok(pid) = handle.parse::<u32>() {
        exec::terminate(pid);
    }
    false
}


#[cfg(test)]
mod tests {
    use super::mock::MockBackend;
    use super::*;
    use crate::registry::mock::MockStore;

    #[tokio::test]
    async fn test_empty_handle_goes_straight_to_create() {
        let backend =
            MockBackend::new(BackendKind::TmuxPane).with_created(Some("%9"), None);
        let store = MockStore::new();

        let result = drive(&backend, &store, "cmd").await.unwrap();

        assert_eq!(result.method, "mock");
        assert_eq!(backend.calls(), vec!["create cmd"]);
        assert_eq!(store.read(BackendKind::TmuxPane), "%9");
    }

    #[tokio::test]
    async fn test_live_handle_reuses_without_creating() {
        let backend = MockBackend::new(BackendKind::TmuxPane).with_live_session();
        let store = MockStore::new().with_entry(BackendKind::TmuxPane, "%3");

        let result = drive(&backend, &store, "cmd").await.unwrap();

        assert_eq!(result.pid, None);
        assert_eq!(backend.calls(), vec!["probe %3", "reuse %3 cmd"]);
        // Handle untouched, create never invoked.
        assert_eq!(store.read(BackendKind::TmuxPane), "%3");
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_stale_handle_is_cleared_then_created_once() {
        let backend =
            MockBackend::new(BackendKind::WeztermPane).with_created(Some("8"), None);
        let store = MockStore::new().with_entry(BackendKind::WeztermPane, "404");

        drive(&backend, &store, "cmd").await.unwrap();

        assert_eq!(backend.calls(), vec!["probe 404", "create cmd"]);
        // Cleared to empty before the new handle landed.
        assert_eq!(
            store.writes(),
            vec![
                (BackendKind::WeztermPane, "".to_string()),
                (BackendKind::WeztermPane, "8".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_reuse_failure_recovers_into_create() {
        let backend = MockBackend::new(BackendKind::KittyWindow)
            .with_live_session()
            .with_reuse_failure()
            .with_created(Some("5"), None);
        let store = MockStore::new().with_entry(BackendKind::KittyWindow, "2");

        let result = drive(&backend, &store, "cmd").await.unwrap();

        assert_eq!(result.method, "mock");
        assert_eq!(
            backend.calls(),
            vec!["probe 2", "reuse 2 cmd", "create cmd"]
        );
        assert_eq!(store.read(BackendKind::KittyWindow), "5");
    }

    #[tokio::test]
    async fn test_create_failure_propagates() {
        let backend = MockBackend::new(BackendKind::TmuxPane).with_create_failure();
        let store = MockStore::new();

        let result = drive(&backend, &store, "cmd").await;

        assert!(matches!(result, Err(SpawnError::CreateFailed { .. })));
    }

    #[tokio::test]
    async fn test_create_without_handle_persists_nothing() {
        let backend =
            MockBackend::new(BackendKind::KittyWindow).with_created(None, Some(321));
        let store = MockStore::new();

        let result = drive(&backend, &store, "cmd").await.unwrap();

        assert_eq!(result.pid, Some(321));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_pid_handle_alive_rejects_garbage() {
        assert!(!pid_handle_alive("not-a-pid"));
        assert!(!pid_handle_alive(""));
    }

    #[test]
    fn test_terminate_and_decline_always_declines() {
        assert!(!terminate_and_decline("not-a-pid"));
    }
}

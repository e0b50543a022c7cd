//! Ghostty: window-only terminal with a platform-dependent launch.
//!
//! On macOS the app is launched through `open`, whose reported pid is
//! the launcher's, not the terminal's — so after launching we poll
//! briefly for the newest Ghostty process and persist that pid instead.
//! Elsewhere `ghostty -e` is spawned directly and its own pid is
//! authoritative. Either way identity is a pid and reuse degrades to
//! terminate-then-recreate.

use async_trait::async_trait;

use crate::backend::pid_handle_alive;
use crate::backend::terminate_and_decline;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::registry::BackendKind;

pub struct GhosttyBackend;

#[async_trait]
impl Backend for GhosttyBackend {
    fn name(&self) -> &'static str {
        "ghostty"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::GhosttyPid
    }

    async fn probe(&self, handle: &str) -> bool {
        pid_handle_alive(handle)
    }

    async fn reuse(&self, handle: &str, _command: &str) -> bool {
        terminate_and_decline(handle)
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        launch(command).await
    }
}

#[cfg(target_os = "macos")]
async fn launch(command: &str) -> Result<Created, SpawnError> {
    use std::time::Duration;

    use tracing::debug;

    use crate::exec;

    exec::run_quiet(
        "open",
        &["-na", "Ghostty", "--args", "-e", "sh", "-c", command],
    )
    .await
    .map_err(|e| SpawnError::CreateFailed {
        backend: "ghostty",
        reason: e.to_string(),
    })?;

    // `open` exits immediately; poll for the newest Ghostty process to
    // learn the terminal's own pid. Best effort: a canvas without a
    // persisted pid just means the next invocation creates again.
    let mut pid = None;
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(out) = exec::run_capture("pgrep", &["-n", "Ghostty"]).await {
            if let Ok(found) = out.parse::<u32>() {
                pid = Some(found);
                break;
            }
        }
    }

    if pid.is_none() {
        debug!("ghostty pid not resolved after launch; no identity persisted");
    }

    // Best-effort nudge of the new window to the right half via System
    // Events; failures (no accessibility permission) are ignored.
    let _ = exec::run_quiet(
        "osascript",
        &[
            "-e",
            r#"tell application "System Events" to tell (first process whose name is "Ghostty")
    set position of front window to {720, 0}
end tell"#,
        ],
    )
    .await;

    Ok(Created {
        handle: pid.map(|p| p.to_string()),
        pid,
    })
}

#[cfg(not(target_os = "macos"))]
async fn launch(command: &str) -> Result<Created, SpawnError> {
    use crate::exec;

    let pid = exec::spawn_detached("ghostty", &["-e", "sh", "-c", command]).map_err(|e| {
        SpawnError::CreateFailed {
            backend: "ghostty",
            reason: e.to_string(),
        }
    })?;

    Ok(Created {
        handle: Some(pid.to_string()),
        pid: Some(pid),
    })
}

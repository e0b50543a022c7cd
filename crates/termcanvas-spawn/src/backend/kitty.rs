//! Kitty: remote control when `allow_remote_control` is on, plain
//! detached window otherwise.
//!
//! With remote control reachable, identity is a kitty window id found by
//! walking the os-window → tab → window tree of `kitty @ ls`, reuse goes
//! through `kitty @ send-text`, and creation launches into a vertical
//! split. Without it there is no probe and no reuse: creation degrades
//! to a detached `kitty` process with no identity captured.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::settle;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct KittyBackend;

const INTERRUPT: &str = "\u{3}";

/// Whether a `kitty @ ls` payload contains the window, walking the
/// nested os-window/tab/window grouping.
fn window_listed(listing: &str, handle: &str) -> bool {
    let Ok(window_id) = handle.parse::<u64>() else {
        return false;
    };
    let Ok(os_windows) = serde_json::from_str::<serde_json::Value>(listing) else {
        return false;
    };

    let Some(os_windows) = os_windows.as_array() else {
        return false;
    };

    os_windows
        .iter()
        .flat_map(|os_window| {
            os_window
                .get("tabs")
                .and_then(|tabs| tabs.as_array())
                .into_iter()
                .flatten()
        })
        .flat_map(|tab| {
            tab.get("windows")
                .and_then(|windows| windows.as_array())
                .into_iter()
                .flatten()
        })
        .any(|window| window.get("id").and_then(|id| id.as_u64()) == Some(window_id))
}

#[async_trait]
impl Backend for KittyBackend {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::KittyWindow
    }

    async fn probe(&self, handle: &str) -> bool {
        // Remote control unreachable means no probe is possible; the
        // handle reads as stale.
        match exec::run_capture("kitty", &["@", "ls"]).await {
            Ok(listing) => window_listed(&listing, handle),
            Err(_) => false,
        }
    }

    async fn reuse(&self, handle: &str, command: &str) -> bool {
        let matcher = format!("id:{}", handle);

        if exec::run_quiet("kitty", &["@", "send-text", "--match", &matcher, INTERRUPT])
            .await
            .is_err()
        {
            return false;
        }

        settle().await;

        let line = format!("clear && {}\n", command);
        exec::run_quiet("kitty", &["@", "send-text", "--match", &matcher, &line])
            .await
            .is_ok()
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        // Remote launch into a split when remote control answers.
        match exec::run_capture(
            "kitty",
            &[
                "@",
                "launch",
                "--type=window",
                "--location=vsplit",
                "--",
                "sh",
                "-c",
                command,
            ],
        )
        .await
        {
            Ok(window_id) => Ok(Created {
                handle: Some(window_id),
                pid: None,
            }),
            Err(e) => {
                debug!(error = %e, "kitty remote control unreachable, spawning detached window");
                let pid = exec::spawn_detached("kitty", &["sh", "-c", command]).map_err(|e| {
                    SpawnError::CreateFailed {
                        backend: "kitty",
                        reason: e.to_string(),
                    }
                })?;
                Ok(Created {
                    handle: None,
                    pid: Some(pid),
                })
            }
        }
    }
}

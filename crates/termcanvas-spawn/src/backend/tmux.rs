//! tmux: pane-splitting multiplexer, controlled through its own CLI.
//!
//! Identity is a pane id (`%N`). Probe asks tmux to resolve the pane;
//! reuse sends an interrupt keystroke, waits for the shell to settle,
//! then retypes the command; create splits the current window and
//! captures the new pane id.

use async_trait::async_trait;

use crate::backend::settle;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct TmuxBackend;

fn reuse_line(command: &str) -> String {
    format!("clear && {}", command)
}

#[async_trait]
impl Backend for TmuxBackend {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::TmuxPane
    }

    async fn probe(&self, handle: &str) -> bool {
        match exec::run_capture("tmux", &["display-message", "-p", "-t", handle, "#{pane_id}"])
            .await
        {
            Ok(pane_id) => pane_id == handle,
            Err(_) => false,
        }
    }

    async fn reuse(&self, handle: &str, command: &str) -> bool {
        if exec::run_quiet("tmux", &["send-keys", "-t", handle, "C-c"])
            .await
            .is_err()
        {
            return false;
        }

        settle().await;

        exec::run_quiet(
            "tmux",
            &["send-keys", "-t", handle, &reuse_line(command), "Enter"],
        )
        .await
        .is_ok()
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        let pane_id = exec::run_capture(
            "tmux",
            &["split-window", "-h", "-P", "-F", "#{pane_id}", command],
        )
        .await
        .map_err(|e| SpawnError::CreateFailed {
            backend: "tmux",
            reason: e.to_string(),
        })?;

        Ok(Created {
            handle: Some(pane_id),
            pid: None,
        })
    }
}

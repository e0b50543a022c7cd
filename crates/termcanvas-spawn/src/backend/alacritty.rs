//! Alacritty: detached-window terminal with no introspection.
//!
//! Alacritty has no pane splitting and no remote control, so identity is
//! the window process pid, probed with a signal check. "Reuse" degrades
//! to terminating the old window process and always creating a fresh
//! one.

use async_trait::async_trait;

use crate::backend::pid_handle_alive;
use crate::backend::terminate_and_decline;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct AlacrittyBackend;

#[async_trait]
impl Backend for AlacrittyBackend {
    fn name(&self) -> &'static str {
        "alacritty"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::AlacrittyPid
    }

    async fn probe(&self, handle: &str) -> bool {
        pid_handle_alive(handle)
    }

    async fn reuse(&self, handle: &str, _command: &str) -> bool {
        terminate_and_decline(handle)
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        let pid = exec::spawn_detached("alacritty", &["-e", "sh", "-c", command]).map_err(|e| {
            SpawnError::CreateFailed {
                backend: "alacritty",
                reason: e.to_string(),
            }
        })?;

        Ok(Created {
            handle: Some(pid.to_string()),
            pid: Some(pid),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_is_signal_check_on_pid() {
        assert!(AlacrittyBackend.probe(&std::process::id().to_string()).await);
        assert!(!AlacrittyBackend.probe("garbage").await);
    }

    #[tokio::test]
    async fn test_reuse_always_declines() {
        // Even a long-dead pid declines so the driver recreates.
        assert!(!AlacrittyBackend.reuse("999999999", "cmd").await);
    }
}

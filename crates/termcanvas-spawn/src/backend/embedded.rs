//! Embedded/IDE terminal host (VS Code and friends).
//!
//! The host offers no programmable split or window control, so the
//! canvas runs as a detached shell process identified by pid. The user
//! is advised to split their editor terminal manually to see it.

use async_trait::async_trait;
use tracing::info;

use crate::backend::pid_handle_alive;
use crate::backend::terminate_and_decline;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct EmbeddedBackend;

#[async_trait]
impl Backend for EmbeddedBackend {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::EmbeddedPid
    }

    async fn probe(&self, handle: &str) -> bool {
        pid_handle_alive(handle)
    }

    async fn reuse(&self, handle: &str, _command: &str) -> bool {
        terminate_and_decline(handle)
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        let pid = exec::spawn_detached("sh", &["-c", command]).map_err(|e| {
            SpawnError::CreateFailed {
                backend: "embedded",
                reason: e.to_string(),
            }
        })?;

        info!(pid, "canvas running as a background shell; split the editor terminal to view it");

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
    async fn test_create_captures_shell_pid() {
        let created = EmbeddedBackend.create("sleep 0.2").await.unwrap();
        let pid = created.pid.unwrap();
        assert_eq!(created.handle.as_deref(), Some(pid.to_string().as_str()));
        assert!(exec::process_alive(pid));
    }

    #[tokio::test]
    async fn test_probe_then_reuse_terminates_and_declines() {
        let created = EmbeddedBackend.create("sleep 5").await.unwrap();
        let handle = created.handle.unwrap();

        assert!(EmbeddedBackend.probe(&handle).await);
        // Declines even though it just terminated the old process, so
        // the driver always recreates. The unreaped child stays a
        // zombie of this test process, so no liveness re-check here.
        assert!(!EmbeddedBackend.reuse(&handle, "cmd").await);
    }
}

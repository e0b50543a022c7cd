//! WezTerm: CLI remote control with structured (JSON) pane listings.
//!
//! Identity is a pane id. Probe lists panes as JSON and matches the id;
//! reuse sends a raw interrupt byte then the retyped command through
//! `wezterm cli send-text`; create splits the current pane and captures
//! the new pane id from stdout.

use async_trait::async_trait;

use crate::backend::settle;
use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct WeztermBackend;

const INTERRUPT: &str = "\u{3}";

/// Whether a `wezterm cli list --format json` payload contains the pane.
fn pane_listed(listing: &str, handle: &str) -> bool {
    let Ok(pane_id) = handle.parse::<u64>() else {
        return false;
    };
    let Ok(panes) = serde_json::from_str::<serde_json::Value>(listing) else {
        return false;
    };

    panes
        .as_array()
        .map(|panes| {
            panes
                .iter()
                .any(|pane| pane.get("pane_id").and_then(|id| id.as_u64()) == Some(pane_id))
        })
        .unwrap_or(false)
}

#[async_trait]
impl Backend for WeztermBackend {
    fn name(&self) -> &'static str {
        "wezterm"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::WeztermPane
    }

    async fn probe(&self, handle: &str) -> bool {
        match exec::run_capture("wezterm", &["cli", "list", "--format", "json"]).await {
            Ok(listing) => pane_listed(&listing, handle),
            Err(_) => false,
        }
    }

    async fn reuse(&self, handle: &str, command: &str) -> bool {
        let send = |text: String| async move {
            exec::run_quiet(
                "wezterm",
                &[
                    "cli",
                    "send-text",
                    "--no-paste",
                    "--pane-id",
                    handle,
                    text.as_str(),
                ],
            )
            .await
        };

        if send(INTERRUPT.to_string()).await.is_err() {
            return false;
        }

        settle().await;

        send(format!("clear && {}\n", command)).await.is_ok()
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        let pane_id = exec::run_capture(
            "wezterm",
            &[
                "cli",
                "split-pane",
                "--right",
                "--percent",
                "50",
                "--",
                "sh",
                "-c",
                command,
            ],
        )
        .await
        .map_err(|e| SpawnError::CreateFailed {
            backend: "wezterm",
            reason: e.to_string(),
        })?;

        Ok(Created {
            handle: Some(pane_id),
            pid: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {"window_id": 0, "tab_id": 1, "pane_id": 4, "workspace": "default"},
        {"window_id": 0, "tab_id": 1, "pane_id": 7, "workspace": "default"}
    ]"#;

    #[test]
    fn test_pane_listed_matches_existing_id() {
        assert!(pane_listed(LISTING, "7"));
        assert!(!pane_listed(LISTING, "9"));
    }

    #[test]
    fn test_pane_listed_rejects_malformed_handle() {
        assert!(!pane_listed(LISTING, "%7"));
        assert!(!pane_listed(LISTING, ""));
    }

    #[test]
    fn test_pane_listed_rejects_malformed_listing() {
        assert!(!pane_listed("not json", "7"));
        assert!(!pane_listed("{}", "7"));
    }

    #[tokio::test]
    async fn test_probe_degrades_when_cli_is_missing() {
        // With no reachable wezterm, the probe reads "not found".
        if exec::run_capture("wezterm", &["--version"]).await.is_err() {
            assert!(!WeztermBackend.probe("7").await);
        }
    }
}

//! Builds the shell command line that runs inside the target session.
//!
//! Structured config is never inlined into the command: arbitrary JSON
//! inside a line that travels through send-keys, AppleScript string
//! literals and remote-control CLIs breaks on quoting. Instead the JSON
//! is written verbatim to a per-id temp file and the command re-reads it
//! with a `"$(cat …)"` fragment at execution time.

use std::path::Path;
use std::path::PathBuf;

use termcanvas_ipc::default_socket_path;
use termcanvas_ipc::socket_dir;

use crate::error::SpawnError;

/// Path of the per-id config handoff file.
pub fn config_handoff_path(id: &str) -> PathBuf {
    socket_dir().join(format!("canvas-config-{}.json", id))
}

fn canvas_binary() -> String {
    std::env::current_exe()
        .map(|exe| exe.display().to_string())
        .unwrap_or_else(|_| "termcanvas".to_string())
}

/// Assemble the `show` invocation for a canvas session.
///
/// Always appends `--socket` (defaulting to the deterministic per-id
/// path) and appends `--scenario` when supplied.
pub fn build_show_command(
    kind: &str,
    id: &str,
    config: Option<&str>,
    socket_path: Option<&Path>,
    scenario: Option<&str>,
) -> Result<String, SpawnError> {
    let socket = socket_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_socket_path(id));

    let mut command = format!("{} show {} --id {}", canvas_binary(), kind, id);

    if let Some(config) = config {
        let path = config_handoff_path(id);
        std::fs::write(&path, config).map_err(|source| SpawnError::ConfigHandoff {
            path: path.clone(),
            source,
        })?;
        command.push_str(&format!(" --config \"$(cat {})\"", path.display()));
    }

    command.push_str(&format!(" --socket {}", socket.display()));

    if let Some(scenario) = scenario {
        command.push_str(&format!(" --scenario {}", scenario));
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_carries_id_and_default_socket() {
        let command = build_show_command("calendar", "demo-1", None, None, None).unwrap();
        assert!(command.contains("show calendar"));
        assert!(command.contains("--id demo-1"));
        assert!(command.contains(&format!(
            "--socket {}",
            default_socket_path("demo-1").display()
        )));
    }

    #[test]
    fn test_explicit_socket_overrides_default() {
        let command = build_show_command(
            "calendar",
            "demo-1",
            None,
            Some(Path::new("/tmp/custom.sock")),
            None,
        )
        .unwrap();
        assert!(command.contains("--socket /tmp/custom.sock"));
        assert!(!command.contains(&default_socket_path("demo-1").display().to_string()));
    }

    #[test]
    fn test_scenario_appended_when_supplied() {
        let command =
            build_show_command("calendar", "demo-1", None, None, Some("busy-week")).unwrap();
        assert!(command.ends_with("--scenario busy-week"));
    }

    #[test]
    fn test_config_goes_through_handoff_file_not_inline() {
        let command =
            build_show_command("calendar", "cb-handoff-1", Some(r#"{"x":1}"#), None, None)
                .unwrap();

        let path = config_handoff_path("cb-handoff-1");
        assert!(command.contains(&format!("--config \"$(cat {})\"", path.display())));
        assert!(!command.contains(r#"{"x":1}"#));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"x":1}"#);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_no_config_flag_without_config() {
        let command = build_show_command("calendar", "demo-1", None, None, None).unwrap();
        assert!(!command.contains("--config"));
    }
}

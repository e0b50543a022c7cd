//! iTerm2: split-capable terminal scripted through AppleScript.
//!
//! Identity is an iTerm session id. All three lifecycle steps walk the
//! window/tab/session tree via `osascript`; a scripting permission
//! prompt or a missing iTerm install surfaces as a nonzero osascript
//! exit, which the probe reads as "session not found".

use async_trait::async_trait;

use crate::backend::Backend;
use crate::backend::Created;
use crate::backend::INTERRUPT_SETTLE_MS;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct ItermBackend;

/// Escape a value for embedding inside an AppleScript string literal.
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn probe_script(session_id: &str) -> String {
    format!(
        r#"tell application "iTerm2"
    repeat with w in windows
        repeat with t in tabs of w
            repeat with s in sessions of t
                if (id of s) is "{id}" then return "found"
            end repeat
        end repeat
    end repeat
    return "missing"
end tell"#,
        id = applescript_escape(session_id)
    )
}

/// Interrupt (character id 3 is ^C), settle, then retype the command
/// into the matched session.
fn reuse_script(session_id: &str, command: &str) -> String {
    format!(
        r#"tell application "iTerm2"
    repeat with w in windows
        repeat with t in tabs of w
            repeat with s in sessions of t
                if (id of s) is "{id}" then
                    tell s to write text (character id 3) newline no
                    delay {delay}
                    tell s to write text "clear && {cmd}"
                    return "ok"
                end if
            end repeat
        end repeat
    end repeat
    return "missing"
end tell"#,
        id = applescript_escape(session_id),
        delay = INTERRUPT_SETTLE_MS as f64 / 1000.0,
        cmd = applescript_escape(command)
    )
}

fn create_script(command: &str) -> String {
    format!(
        r#"tell application "iTerm2"
    tell current session of current window
        set newSession to (split vertically with default profile)
    end tell
    tell newSession to write text "{cmd}"
    return id of newSession
end tell"#,
        cmd = applescript_escape(command)
    )
}

#[async_trait]
impl Backend for ItermBackend {
    fn name(&self) -> &'static str {
        "iterm"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::ItermSession
    }

    async fn probe(&self, handle: &str) -> bool {
        match exec::run_capture("osascript", &["-e", &probe_script(handle)]).await {
            Ok(out) => out == "found",
            Err(_) => false,
        }
    }

    async fn reuse(&self, handle: &str, command: &str) -> bool {
        match exec::run_capture("osascript", &["-e", &reuse_script(handle, command)]).await {
            Ok(out) => out == "ok",
            Err(_) => false,
        }
    }

    async fn create(&self, command: &str) -> Result<Created, SpawnError> {
        let session_id = exec::run_capture("osascript", &["-e", &create_script(command)])
            .await
            .map_err(|e| SpawnError::CreateFailed {
                backend: "iterm",
                reason: e.to_string(),
            })?;

        Ok(Created {
            handle: Some(session_id),
            pid: None,
        })
    }
}

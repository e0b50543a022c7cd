//! Apple Terminal: window-only AppleScript automation.
//!
//! Terminal.app cannot split panes or send raw keystrokes, so identity
//! is a window id (decimal) and reuse just matches the window, brings it
//! to the front and runs the command in it with `do script`. Creation
//! opens a new window, resizes it to the right half of the screen and
//! titles it.

use async_trait::async_trait;

use crate::backend::Backend;
use crate::backend::Created;
use crate::error::SpawnError;
use crate::exec;
use crate::registry::BackendKind;

pub struct AppleTerminalBackend;

const WINDOW_TITLE: &str = "Canvas";

fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn probe_script(window_id: &str) -> String {
    format!(
        r#"tell application "Terminal"
    return exists (window id {id})
end tell"#,
        id = window_id
    )
}

fn reuse_script(window_id: &str, command: &str) -> String {
    format!(
        r#"tell application "Terminal"
    set w to window id {id}
    set index of w to 1
    activate
    do script "clear && {cmd}" in w
    return "ok"
end tell"#,
        id = window_id,
        cmd = applescript_escape(command)
    )
}

fn create_script(command: &str) -> String {
    format!(
        r#"tell application "Terminal"
    activate
    set newTab to do script "{cmd}"
    set custom title of newTab to "{title}"
    set windowId to id of front window
    tell application "Finder" to set screenBounds to bounds of window of desktop
    set screenWidth to item 3 of screenBounds
    set screenHeight to item 4 of screenBounds
    set bounds of front window to {{screenWidth / 2, 0, screenWidth, screenHeight}}
    return windowId
end tell"#,
        cmd = applescript_escape(command),
        title = WINDOW_TITLE
    )
}

#[async_trait]
impl Backend for AppleTerminalBackend {
    fn name(&self) -> &'static str {
        "apple-terminal"
    }

    fn store_kind(&self) -> BackendKind {
        BackendKind::TerminalWindow
    }

    async fn probe(&self, handle: &str) -> bool {
        // Window ids are decimal; a malformed handle would make the
        // script itself fail to compile, so reject it up front.
        if handle.parse::<u64>().is_err() {
            return false;
        }

        match exec::run_capture("osascript", &["-e", &probe_script(handle)]).await {
            Ok(out) => out == "true",
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
        let window_id = exec::run_capture("osascript", &["-e", &create_script(command)])
            .await
            .map_err(|e| SpawnError::CreateFailed {
                backend: "apple-terminal",
                reason: e.to_string(),
            })?;

        Ok(Created {
            handle: Some(window_id),
            pid: None,
        })
    }
}

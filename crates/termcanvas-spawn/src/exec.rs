//! Child-process execution for backend control tools.
//!
//! Two idioms, matching how the backends consume external tools:
//! awaited capture runs (tmux, wezterm, kitty, osascript) where buffered
//! output is collected until exit and a clean zero exit is distinguished
//! from a nonzero exit or a launch error, and detached spawn-and-forget
//! runs (alacritty, ghostty, plain shells) where only the pid is kept and
//! the child's lifetime is never supervised.

use std::process::Stdio;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Run a tool to completion, returning trimmed stdout on a zero exit.
pub async fn run_capture(program: &str, args: &[&str]) -> Result<String, ExecError> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ExecError::Launch {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    } else {
        Err(ExecError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Run a tool to completion for its exit status only.
pub async fn run_quiet(program: &str, args: &[&str]) -> Result<(), ExecError> {
    run_capture(program, args).await.map(|_| ())
}

/// Spawn a detached process and return its pid without supervising it.
pub fn spawn_detached(program: &str, args: &[&str]) -> Result<u32, ExecError> {
    std::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|child| child.id())
        .map_err(|source| ExecError::Launch {
            program: program.to_string(),
            source,
        })
}

/// Signal-check liveness with `kill(pid, 0)`.
///
/// EPERM means the process exists but is not ours, which still counts
/// as alive for probe purposes.
pub fn process_alive(pid: u32) -> bool {
    let Ok(pid_t) = libc::pid_t::try_from(pid) else {
        return false;
    };

    if unsafe { libc::kill(pid_t, 0) } == 0 {
        return true;
    }

    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Best-effort SIGTERM; pid-identity backends use this before recreating.
pub fn terminate(pid: u32) {
    // kill(0, …) would signal our whole process group.
    if pid == 0 {
        return;
    }
    if let Ok(pid_t) = libc::pid_t::try_from(pid) {
        unsafe {
            libc::kill(pid_t, libc::SIGTERM);
        }
    }
}

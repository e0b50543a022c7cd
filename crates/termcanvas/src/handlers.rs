//! Subcommand handlers: thin glue between clap and the spawn/ipc crates.

use std::path::PathBuf;

use serde_json::json;
use serde_json::Value;

use termcanvas_ipc::default_socket_path;
use termcanvas_ipc::ClientError;
use termcanvas_ipc::QueryRequest;
use termcanvas_ipc::DEFAULT_TIMEOUT_MS;
use termcanvas_spawn::detect;
use termcanvas_spawn::spawn_canvas;
use termcanvas_spawn::FileStore;
use termcanvas_spawn::SpawnError;
use termcanvas_spawn::SpawnOptions;

use crate::canvas;
use crate::canvas::CanvasHost;
use crate::color::Colors;

pub async fn handle_spawn(
    kind: &str,
    id: &str,
    config: Option<&str>,
    socket: Option<PathBuf>,
    scenario: Option<String>,
    json: bool,
) -> Result<(), SpawnError> {
    let store = FileStore::shared();
    let result = spawn_canvas(
        kind,
        id,
        config,
        SpawnOptions {
            socket_path: socket,
            scenario,
        },
        &store,
    )
    .await?;

    if json {
        println!("{}", json!({ "method": result.method, "pid": result.pid }));
        return Ok(());
    }

    match result.pid {
        Some(pid) => println!(
            "{} canvas running via {} (pid {})",
            Colors::success("Spawned:"),
            result.method,
            pid
        ),
        None => println!(
            "{} canvas running via {}",
            Colors::success("Spawned:"),
            result.method
        ),
    }

    if result.method == "embedded" {
        println!(
            "{}",
            Colors::dim("The canvas runs as a background shell; split your editor terminal to view it.")
        );
    }

    Ok(())
}

pub async fn handle_show(
    kind: String,
    id: String,
    config: Option<String>,
    socket: Option<PathBuf>,
    scenario: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config
        .map(|text| serde_json::from_str::<Value>(&text))
        .transpose()?;
    let socket = socket.unwrap_or_else(|| default_socket_path(&id));

    let host = CanvasHost::new(kind, id, config, scenario);
    canvas::run(host, socket).await?;
    Ok(())
}

pub fn handle_env(json: bool) {
    let environment = detect();

    if json {
        println!(
            "{}",
            json!({
                "tmux": environment.tmux,
                "iterm": environment.iterm,
                "appleTerminal": environment.apple_terminal,
                "wezterm": environment.wezterm,
                "kitty": environment.kitty,
                "alacritty": environment.alacritty,
                "embedded": environment.embedded,
                "ghostty": environment.ghostty,
                "app": environment.app.label(),
            })
        );
        return;
    }

    println!("{} {}", Colors::info("Terminal:"), environment.summary());
}

pub async fn handle_update(
    id: &str,
    config: &str,
    socket: Option<PathBuf>,
) -> Result<(), ClientError> {
    let socket = socket.unwrap_or_else(|| default_socket_path(id));
    let config: Value = serde_json::from_str(config)?;
    termcanvas_ipc::update(&socket, config).await
}

/// Query handler for `selection` and `content`: prints the serialized
/// payload, or fails (nonzero exit) when the canvas cannot be reached.
pub async fn handle_query(
    id: &str,
    socket: Option<PathBuf>,
    request: QueryRequest,
) -> Result<(), ClientError> {
    let socket = socket.unwrap_or_else(|| default_socket_path(id));
    let Some(expected) = request.expected_reply() else {
        // `update` is fire-and-forget and routed through handle_update.
        return Ok(());
    };

    let payload = termcanvas_ipc::request(&socket, &request, expected, DEFAULT_TIMEOUT_MS).await?;
    println!("{}", payload);
    Ok(())
}

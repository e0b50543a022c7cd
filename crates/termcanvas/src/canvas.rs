//! Minimal canvas host behind the `show` subcommand.
//!
//! The rendered interface itself lives outside this tool; what `spawn`
//! needs is a command line that resolves to a process owning the
//! session's socket and speaking the wire protocol. This host is that
//! boundary made executable: it prints a banner, holds the current
//! config, and answers query frames until the session is torn down.

use std::path::Path;
use std::path::PathBuf;

use serde_json::json;
use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::UnixListener;
use tokio::net::UnixStream;
use tracing::warn;

use termcanvas_ipc::QueryRequest;
use termcanvas_ipc::Reply;

use crate::color::Colors;

pub struct CanvasHost {
    kind: String,
    id: String,
    scenario: Option<String>,
    config: Value,
    selection: Value,
}

impl CanvasHost {
    pub fn new(kind: String, id: String, config: Option<Value>, scenario: Option<String>) -> Self {
        Self {
            kind,
            id,
            scenario,
            config: config.unwrap_or(Value::Null),
            selection: Value::Null,
        }
    }

    /// Protocol step: `update` mutates and stays silent, queries answer
    /// with their own reply kind.
    fn reply_for(&mut self, request: QueryRequest) -> Option<Reply> {
        match request {
            QueryRequest::Update { config } => {
                self.config = config;
                None
            }
            QueryRequest::GetSelection => Some(Reply::new("selection", self.selection.clone())),
            QueryRequest::GetContent => Some(Reply::new(
                "content",
                json!({
                    "kind": self.kind,
                    "scenario": self.scenario,
                    "config": self.config,
                }),
            )),
        }
    }

    fn banner(&self, socket: &Path) -> String {
        let mut banner = format!("canvas '{}' (id {})", self.kind, self.id);
        if let Some(scenario) = &self.scenario {
            banner.push_str(&format!(", scenario {}", scenario));
        }
        banner.push_str(&format!("\nlistening on {}", socket.display()));
        banner
    }
}

pub async fn run(mut host: CanvasHost, socket: PathBuf) -> std::io::Result<()> {
    // The socket file may be left over from a previous canvas that was
    // interrupted; binding requires the path to be free.
    let _ = std::fs::remove_file(&socket);
    let listener = UnixListener::bind(&socket)?;

    println!("{}", Colors::info(&host.banner(&socket)));

    loop {
        let (stream, _) = listener.accept().await?;
        if let Err(e) = serve_connection(&mut host, stream).await {
            warn!(error = %e, "canvas connection failed");
        }
    }
}

async fn serve_connection(host: &mut CanvasHost, stream: UnixStream) -> std::io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    while let Some(line) = lines.next_line().await? {
        let Ok(request) = serde_json::from_str::<QueryRequest>(&line) else {
            warn!(%line, "ignoring malformed frame");
            continue;
        };

        if let Some(reply) = host.reply_for(request) {
            let mut frame = serde_json::to_string(&reply).map_err(std::io::Error::from)?;
            frame.push('\n');
            write.write_all(frame.as_bytes()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> CanvasHost {
        CanvasHost::new(
            "calendar".to_string(),
            "demo-1".to_string(),
            Some(json!({"week": 34})),
            None,
        )
    }

    #[test]
    fn test_get_selection_replies_with_selection_kind() {
        let reply = host().reply_for(QueryRequest::GetSelection).unwrap();
        assert_eq!(reply.kind, "selection");
        assert!(reply.data.is_null());
    }

    #[test]
    fn test_get_content_embeds_kind_and_config() {
        let reply = host().reply_for(QueryRequest::GetContent).unwrap();
        assert_eq!(reply.kind, "content");
        assert_eq!(reply.data["kind"], "calendar");
        assert_eq!(reply.data["config"]["week"], 34);
    }

    #[test]
    fn test_update_replaces_config_and_stays_silent() {
        let mut host = host();
        let reply = host.reply_for(QueryRequest::Update {
            config: json!({"week": 35}),
        });
        assert!(reply.is_none());

        let content = host.reply_for(QueryRequest::GetContent).unwrap();
        assert_eq!(content.data["config"]["week"], 35);
    }

    #[test]
    fn test_banner_names_kind_id_and_socket() {
        let banner = host().banner(Path::new("/tmp/canvas-demo-1.sock"));
        assert!(banner.contains("calendar"));
        assert!(banner.contains("demo-1"));
        assert!(banner.contains("/tmp/canvas-demo-1.sock"));
    }
}

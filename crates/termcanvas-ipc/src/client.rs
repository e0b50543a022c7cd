//! One-shot query client for a running canvas.
//!
//! Each call opens its own connection, writes a single newline-terminated
//! JSON frame and, for query requests, waits for exactly one reply line.
//! A reply whose `type` does not match the expected kind resolves to a
//! serialized `null` rather than an error: the canvas answered, just not
//! with what we asked for, and callers treat that as "nothing there".

use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::UnixStream;

use crate::error::ClientError;
use crate::types::QueryRequest;
use crate::types::Reply;

/// Bounded wait for a reply line.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Send a query and await one reply line.
///
/// Returns the serialized `data` payload of the reply, or serialized
/// `null` when the reply's declared type does not match `expected`.
pub async fn request(
    socket_path: &Path,
    request: &QueryRequest,
    expected: &str,
    timeout_ms: u64,
) -> Result<String, ClientError> {
    let mut stream = UnixStream::connect(socket_path).await?;

    let mut frame = serde_json::to_string(request)?;
    frame.push('\n');
    stream.write_all(frame.as_bytes()).await?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();

    let read = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        reader.read_line(&mut line),
    )
    .await;

    match read {
        Err(_) => Err(ClientError::Timeout { timeout_ms }),
        Ok(Err(e)) => Err(ClientError::ConnectionFailed(e)),
        Ok(Ok(0)) => Err(ClientError::ConnectionClosed),
        Ok(Ok(_)) => {
            let reply: Reply = serde_json::from_str(line.trim_end())?;
            if reply.kind == expected {
                Ok(serde_json::to_string(&reply.data)?)
            } else {
                Ok("null".to_string())
            }
        }
    }
}

/// Fire-and-forget config push: write one frame and close without
/// awaiting a reply.
pub async fn update(socket_path: &Path, config: Value) -> Result<(), ClientError> {
    let mut stream = UnixStream::connect(socket_path).await?;

    let mut frame = serde_json::to_string(&QueryRequest::Update { config })?;
    frame.push('\n');
    stream.write_all(frame.as_bytes()).await?;
    stream.shutdown().await?;

    Ok(())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to connect to canvas socket: {0}")]
    ConnectionFailed(#[from] std::io::Error),

    #[error("Failed to serialize request: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("No reply from canvas within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Canvas closed the connection before replying")]
    ConnectionClosed,
}

impl ClientError {
    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            ClientError::ConnectionFailed(_) => {
                "No canvas is listening on that socket. Spawn one first, or pass --socket."
                    .to_string()
            }
            ClientError::SerializationFailed(_) => {
                "Check that --config is valid JSON.".to_string()
            }
            ClientError::Timeout { .. } => {
                "The canvas did not answer in time. It may be busy or hung; try again.".to_string()
            }
            ClientError::ConnectionClosed => {
                "The canvas exited mid-request. Respawn it and retry.".to_string()
            }
        }
    }

    /// Returns whether this error is potentially transient and may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Timeout { .. } | ClientError::ConnectionClosed
        )
    }
}

use std::path::PathBuf;

/// Directory holding canvas sockets and state files.
///
/// Overridable via `TERMCANVAS_SOCKET_DIR` so tests and sandboxed
/// environments can redirect it away from the shared temp directory.
pub fn socket_dir() -> PathBuf {
    if let Ok(custom_dir) = std::env::var("TERMCANVAS_SOCKET_DIR") {
        return PathBuf::from(custom_dir);
    }

    std::env::temp_dir()
}

/// Default socket path for a canvas session, derived from its id.
pub fn default_socket_path(id: &str) -> PathBuf {
    socket_dir().join(format!("canvas-{}.sock", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_path_is_deterministic() {
        let a = default_socket_path("demo-1");
        let b = default_socket_path("demo-1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_socket_path_embeds_id() {
        let path = default_socket_path("demo-1");
        assert!(path.to_string_lossy().ends_with("canvas-demo-1.sock"));
    }
}

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A client-to-canvas request frame.
///
/// Serialized as `{"type":"update","config":{...}}`,
/// `{"type":"getSelection"}` or `{"type":"getContent"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueryRequest {
    #[serde(rename = "update")]
    Update { config: Value },

    #[serde(rename = "getSelection")]
    GetSelection,

    #[serde(rename = "getContent")]
    GetContent,
}

impl QueryRequest {
    /// The reply `type` a canvas is expected to answer this request with.
    ///
    /// `update` is fire-and-forget and expects no reply.
    pub fn expected_reply(&self) -> Option<&'static str> {
        match self {
            QueryRequest::Update { .. } => None,
            QueryRequest::GetSelection => Some("selection"),
            QueryRequest::GetContent => Some("content"),
        }
    }
}

/// A canvas-to-client reply frame: `{"type":"<kind>","data":<payload>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl Reply {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_selection_wire_format() {
        let json = serde_json::to_string(&QueryRequest::GetSelection).unwrap();
        assert_eq!(json, r#"{"type":"getSelection"}"#);
    }

    #[test]
    fn test_get_content_wire_format() {
        let json = serde_json::to_string(&QueryRequest::GetContent).unwrap();
        assert_eq!(json, r#"{"type":"getContent"}"#);
    }

    #[test]
    fn test_update_wire_format_carries_config() {
        let req = QueryRequest::Update {
            config: json!({"x": 1}),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"type":"update","config":{"x":1}}"#);
    }

    #[test]
    fn test_request_round_trips() {
        let req = QueryRequest::Update {
            config: json!({"rows": ["a", "b"]}),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: QueryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_expected_reply_kinds() {
        assert_eq!(QueryRequest::GetSelection.expected_reply(), Some("selection"));
        assert_eq!(QueryRequest::GetContent.expected_reply(), Some("content"));
        assert_eq!(
            QueryRequest::Update { config: json!({}) }.expected_reply(),
            None
        );
    }

    #[test]
    fn test_reply_deserializes_missing_data_as_null() {
        let reply: Reply = serde_json::from_str(r#"{"type":"selection"}"#).unwrap();
        assert_eq!(reply.kind, "selection");
        assert!(reply.data.is_null());
    }
}

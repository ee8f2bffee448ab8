use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use uuid::Uuid;

use super::{AccessToken, PackId, Turn};

/// Body of a `deepquery` call.
///
/// `pack_id` is always present on the wire and is `null` when the query is
/// not scoped to a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// User text followed by the text extracted from attachments.
    pub user_message: String,
    /// Selected pack, if any.
    pub pack_id: Option<PackId>,
    /// Conversation so far, in chronological order.
    pub history: Vec<Turn>,
}

impl QueryPayload {
    pub fn new(user_message: impl Into<String>, pack_id: Option<PackId>, history: Vec<Turn>) -> Self {
        Self {
            user_message: user_message.into(),
            pack_id,
            history,
        }
    }
}

/// A query ready to be sent: payload plus the bearer token that authorizes it.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Identifier used to correlate log events of one query.
    pub request_id: Uuid,
    pub payload: QueryPayload,
    pub token: AccessToken,
}

impl QueryRequest {
    pub fn new(payload: QueryPayload, token: AccessToken) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            payload,
            token,
        }
    }
}

/// Successful query response.
///
/// The `message` field is the assistant's reply; every other field the
/// service returns is kept untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryReply {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl QueryReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// How a query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum QueryFailureKind {
    /// The service answered with a non-2xx status.
    Http,
    /// The request never completed (connection refused, timeout, ...).
    Transport,
    /// Anything else: missing configuration, undecodable body.
    Other,
}

/// Client-side description of a failed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub kind: QueryFailureKind,
    /// Human-readable description shown to the user verbatim.
    pub description: String,
    /// HTTP status, for [`QueryFailureKind::Http`].
    pub status: Option<u16>,
}

impl QueryFailure {
    /// Creates a failure for a non-2xx response.
    pub fn http(status: u16, description: impl Into<String>) -> Self {
        Self {
            kind: QueryFailureKind::Http,
            description: description.into(),
            status: Some(status),
        }
    }

    /// Creates a failure for a request that did not complete.
    pub fn transport(description: impl Into<String>) -> Self {
        Self {
            kind: QueryFailureKind::Transport,
            description: description.into(),
            status: None,
        }
    }

    /// Creates a failure for anything that is neither HTTP nor transport.
    pub fn other(description: impl Into<String>) -> Self {
        Self {
            kind: QueryFailureKind::Other,
            description: description.into(),
            status: None,
        }
    }
}

/// Outcome of a query: either the assistant's reply or an error description.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Success(QueryReply),
    Failure(QueryFailure),
}

impl QueryResult {
    /// Returns true for [`QueryResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the assistant's reply, if the query succeeded.
    pub fn assistant_message(&self) -> Option<&str> {
        match self {
            Self::Success(reply) => Some(&reply.message),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error description, if the query failed.
    pub fn error_description(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.description),
        }
    }

    /// Renders the result as JSON: the reply body on success,
    /// `{"error": description}` on failure.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Success(reply) => {
                serde_json::to_value(reply).unwrap_or_else(|_| serde_json::json!({}))
            }
            Self::Failure(failure) => serde_json::json!({ "error": failure.description }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = QueryPayload::new("hi", Some(PackId::Int(1)), vec![Turn::user("earlier")]);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "user_message": "hi",
                "pack_id": 1,
                "history": [{"role": "user", "content": "earlier"}],
            })
        );
    }

    #[test]
    fn test_payload_without_pack_sends_null() {
        let payload = QueryPayload::new("hi", None, Vec::new());
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["pack_id"].is_null());
    }

    #[test]
    fn test_reply_keeps_extra_fields() {
        let reply: QueryReply =
            serde_json::from_str(r#"{"message":"hi","sources":["a.pdf"]}"#).unwrap();
        assert_eq!(reply.message, "hi");
        assert_eq!(reply.extra["sources"], serde_json::json!(["a.pdf"]));

        let empty: QueryReply = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.message, "");
    }

    #[test]
    fn test_result_accessors_are_exclusive() {
        let success = QueryResult::Success(QueryReply::new("hi"));
        assert!(success.is_success());
        assert_eq!(success.assistant_message(), Some("hi"));
        assert_eq!(success.error_description(), None);

        let failure = QueryResult::Failure(QueryFailure::http(400, "HTTP error occurred: 400"));
        assert!(!failure.is_success());
        assert_eq!(failure.assistant_message(), None);
        assert_eq!(failure.error_description(), Some("HTTP error occurred: 400"));
    }

    #[test]
    fn test_result_to_json() {
        let failure = QueryResult::Failure(QueryFailure::transport("Request error occurred: refused"));
        assert_eq!(
            failure.to_json(),
            serde_json::json!({"error": "Request error occurred: refused"})
        );

        let success = QueryResult::Success(QueryReply::new("hi"));
        assert_eq!(success.to_json(), serde_json::json!({"message": "hi"}));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let payload = QueryPayload::new("hi", None, Vec::new());
        let a = QueryRequest::new(payload.clone(), AccessToken::new("t"));
        let b = QueryRequest::new(payload, AccessToken::new("t"));
        assert_ne!(a.request_id, b.request_id);
    }
}

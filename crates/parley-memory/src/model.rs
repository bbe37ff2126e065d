//! Episode records and the message shapes handed to LLM callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Event type used for chat messages.
pub const MESSAGE_EVENT: &str = "message";

/// Role assumed for messages recorded without one.
pub const DEFAULT_ROLE: &str = "user";

/// Open key-value bag attached to an episode.
pub type Metadata = Map<String, Value>;

/// One immutable event recorded in a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    id: String,
    session_id: String,
    user_id: String,
    content: String,
    role: Option<String>,
    event_type: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    metadata: Metadata,
}

impl Episode {
    /// Build a new episode stamped with a fresh id and the current time.
    pub(crate) fn new(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
        role: Option<String>,
        event_type: impl Into<String>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            user_id: user_id.into(),
            content: content.into(),
            role,
            event_type: event_type.into(),
            timestamp: Utc::now(),
            metadata: metadata.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the session this episode was recorded in.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Role label, if one was supplied.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Whether this episode counts as a chat message.
    pub fn is_message(&self) -> bool {
        self.event_type == MESSAGE_EVENT
    }

    /// Capture time of the episode.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Render the episode as a plain JSON object.
    ///
    /// Keys are `id`, `session_id`, `user_id`, `content`, `role`,
    /// `event_type`, `timestamp` (RFC 3339) and `metadata`. An unset role is
    /// emitted as `null`.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "session_id": self.session_id,
            "user_id": self.user_id,
            "content": self.content,
            "role": self.role,
            "event_type": self.event_type,
            "timestamp": self.timestamp.to_rfc3339(),
            "metadata": self.metadata,
        })
    }
}

/// Optional fields for recording a chat message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Role label such as "user", "assistant" or "system".
    pub role: Option<String>,
    /// Extra metadata stored with the episode.
    pub metadata: Option<Metadata>,
}

impl MessageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role label.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Attach metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A `{role, content}` pair ready to send to a chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

impl LlmMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Episode, LlmMessage, MESSAGE_EVENT, MessageOptions, Metadata};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn to_value_keeps_null_role_and_empty_metadata() {
        let episode = Episode::new("s1", "james", "hello", None, MESSAGE_EVENT, None);
        let value = episode.to_value();
        let object = value.as_object().expect("object");

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "content",
                "event_type",
                "id",
                "metadata",
                "role",
                "session_id",
                "timestamp",
                "user_id"
            ]
        );
        assert_eq!(value["role"], json!(null));
        assert_eq!(value["metadata"], json!({}));
        assert_eq!(value["event_type"], json!("message"));
        assert_eq!(value["session_id"], json!("s1"));
    }

    #[test]
    fn to_value_timestamp_is_rfc3339() {
        let episode = Episode::new("s1", "james", "hello", None, MESSAGE_EVENT, None);
        let value = episode.to_value();
        let raw = value["timestamp"].as_str().expect("timestamp string");
        let parsed = chrono::DateTime::parse_from_rfc3339(raw).expect("parse");
        assert_eq!(parsed.timestamp_micros(), episode.timestamp().timestamp_micros());
    }

    #[test]
    fn episodes_get_distinct_ids() {
        let a = Episode::new("s1", "u", "a", None, MESSAGE_EVENT, None);
        let b = Episode::new("s1", "u", "b", None, MESSAGE_EVENT, None);
        assert!(a.id() != b.id());
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let mut metadata = Metadata::new();
        metadata.insert("turn".to_string(), json!(3));
        let episode = Episode::new(
            "s1",
            "james",
            "hi",
            Some("assistant".to_string()),
            MESSAGE_EVENT,
            Some(metadata),
        );
        let encoded = serde_json::to_string(&episode).expect("encode");
        let decoded: Episode = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, episode);
    }

    #[test]
    fn message_options_builder_sets_fields() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), json!("cli"));
        let options = MessageOptions::new().role("system").metadata(metadata.clone());
        assert_eq!(options.role.as_deref(), Some("system"));
        assert_eq!(options.metadata, Some(metadata));
    }

    #[test]
    fn llm_message_serializes_to_two_keys() {
        let message = LlmMessage::new("user", "hello");
        assert_eq!(
            serde_json::to_value(&message).expect("encode"),
            json!({ "role": "user", "content": "hello" })
        );
    }
}

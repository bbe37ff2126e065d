//! Append-only conversation sessions and their LLM projection.

use crate::model::{DEFAULT_ROLE, Episode, LlmMessage, MESSAGE_EVENT, MessageOptions, Metadata};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use uuid::Uuid;

/// Participant count above which user labels are rendered.
const LABEL_PARTICIPANT_THRESHOLD: usize = 2;

/// Filters applied by [`Session::get_episodes`].
///
/// `limit` keeps the most recent matches. `Some(0)` behaves like `None` and
/// returns every match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeFilter {
    /// Keep only the last `limit` matches.
    pub limit: Option<usize>,
    /// Exact match on the author.
    pub user_id: Option<String>,
    /// Exact match on the event type.
    pub event_type: Option<String>,
}

impl EpisodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the last `limit` matches.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Match episodes authored by `user_id`.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Match episodes of `event_type`.
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    fn matches(&self, episode: &Episode) -> bool {
        self.user_id
            .as_deref()
            .is_none_or(|user_id| episode.user_id() == user_id)
            && self
                .event_type
                .as_deref()
                .is_none_or(|event_type| episode.event_type() == event_type)
    }
}

/// Ordered history of episodes for one conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Session identifier.
    id: String,
    /// Participants in first-seen order.
    participants: Vec<String>,
    /// Episodes in insertion order.
    episodes: Vec<Episode>,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session, generating an id when none is supplied.
    pub fn new(session_id: Option<String>, participants: Option<Vec<String>>) -> Self {
        let mut session = Self {
            id: session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            participants: Vec::new(),
            episodes: Vec::new(),
            created_at: Utc::now(),
        };
        for participant in participants.unwrap_or_default() {
            session.add_participant(participant);
        }
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|participant| participant == user_id)
    }

    /// All episodes in chronological order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Add a participant unless already present. Returns true if added.
    pub fn add_participant(&mut self, user_id: impl Into<String>) -> bool {
        let user_id = user_id.into();
        if self.has_participant(&user_id) {
            return false;
        }
        debug!(
            "added participant (session_id={}, user_id={})",
            self.id, user_id
        );
        self.participants.push(user_id);
        true
    }

    /// Record a chat message and return the stored episode.
    pub fn add_message(
        &mut self,
        user_id: impl Into<String>,
        content: impl Into<String>,
        options: MessageOptions,
    ) -> &Episode {
        let episode = Episode::new(
            self.id.clone(),
            user_id,
            content,
            options.role,
            MESSAGE_EVENT,
            options.metadata,
        );
        self.push(episode)
    }

    /// Record a non-message event such as a game action.
    ///
    /// The content is the compact JSON rendering of `data` and the metadata
    /// is `data` itself. An event type of "message" is accepted and is then
    /// indistinguishable from a chat message.
    pub fn add_event(
        &mut self,
        user_id: impl Into<String>,
        event_type: impl Into<String>,
        data: Metadata,
    ) -> &Episode {
        let event_type = event_type.into();
        if event_type.is_empty() {
            warn!("recording event with empty event type (session_id={})", self.id);
        }
        let content = serde_json::Value::Object(data.clone()).to_string();
        let episode = Episode::new(
            self.id.clone(),
            user_id,
            content,
            None,
            event_type,
            Some(data),
        );
        self.push(episode)
    }

    fn push(&mut self, episode: Episode) -> &Episode {
        debug!(
            "appending episode (session_id={}, event_type={}, user_id={}, content_len={})",
            self.id,
            episode.event_type(),
            episode.user_id(),
            episode.content().len()
        );
        self.episodes.push(episode);
        &self.episodes[self.episodes.len() - 1]
    }

    /// Episodes matching `filter`, oldest first.
    pub fn get_episodes(&self, filter: &EpisodeFilter) -> Vec<&Episode> {
        let matched: Vec<&Episode> = self
            .episodes
            .iter()
            .filter(|episode| filter.matches(episode))
            .collect();
        tail(matched, filter.limit.unwrap_or(0))
    }

    /// Render the last `limit` chat messages as LLM context.
    ///
    /// A `limit` of 0 returns every message. When `include_user_labels` is set
    /// and the session has more than two participants, each content is
    /// prefixed with `[user_id] `.
    pub fn get_messages_for_llm(
        &self,
        limit: usize,
        include_user_labels: bool,
    ) -> Vec<LlmMessage> {
        let messages: Vec<&Episode> = self
            .episodes
            .iter()
            .filter(|episode| episode.is_message())
            .collect();
        let show_labels =
            include_user_labels && self.participants.len() > LABEL_PARTICIPANT_THRESHOLD;

        tail(messages, limit)
            .into_iter()
            .map(|episode| {
                let role = episode.role().unwrap_or(DEFAULT_ROLE);
                let content = if show_labels {
                    format!("[{}] {}", episode.user_id(), episode.content())
                } else {
                    episode.content().to_string()
                };
                LlmMessage::new(role, content)
            })
            .collect()
    }
}

/// Keep the last `limit` items; 0 keeps everything.
fn tail<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit == 0 {
        return items;
    }
    let start = items.len().saturating_sub(limit);
    items.split_off(start)
}

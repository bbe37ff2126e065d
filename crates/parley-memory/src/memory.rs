//! Session registry with a current-session pointer.

use crate::error::MemoryError;
use crate::model::{Episode, LlmMessage, MessageOptions};
use crate::session::Session;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Default number of messages rendered for an LLM call.
pub const DEFAULT_CONTEXT_LIMIT: usize = 10;

/// Registry of sessions owned by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    /// Sessions keyed by id.
    sessions: HashMap<String, Session>,
    /// Id of the active session.
    current_session_id: Option<String>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all registered sessions, in no particular order.
    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    /// Create a session, register it and make it current.
    ///
    /// An existing session with the same id is replaced.
    pub fn create_session(
        &mut self,
        session_id: Option<String>,
        participants: Option<Vec<String>>,
    ) -> &mut Session {
        let session = Session::new(session_id, participants);
        let id = session.id().to_string();
        info!(
            "created session (session_id={}, participants={})",
            id,
            session.participants().len()
        );
        self.current_session_id = Some(id.clone());
        match self.sessions.entry(id) {
            Entry::Occupied(mut entry) => {
                warn!("replaced existing session (session_id={})", entry.key());
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    pub fn get_session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn get_session_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(session_id)
    }

    /// The active session, if the pointer is set and resolves.
    pub fn get_current_session(&self) -> Option<&Session> {
        self.current_session_id
            .as_deref()
            .and_then(|id| self.sessions.get(id))
    }

    pub fn get_current_session_mut(&mut self) -> Option<&mut Session> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.get_mut(id)
    }

    /// Point the registry at an existing session.
    pub fn set_current_session(&mut self, session_id: &str) -> Result<(), MemoryError> {
        if !self.sessions.contains_key(session_id) {
            return Err(MemoryError::InvalidReference(session_id.to_string()));
        }
        debug!("switched current session (session_id={})", session_id);
        self.current_session_id = Some(session_id.to_string());
        Ok(())
    }

    /// Record a message in the current session, creating one if needed.
    ///
    /// A lazily created session has `user_id` as its only participant.
    pub fn add_message(
        &mut self,
        user_id: impl Into<String>,
        content: impl Into<String>,
        options: MessageOptions,
    ) -> &Episode {
        let user_id = user_id.into();
        let current = self
            .current_session_id
            .clone()
            .filter(|id| self.sessions.contains_key(id));
        let session = match current {
            Some(id) => self
                .sessions
                .entry(id)
                .or_insert_with_key(|id| Session::new(Some(id.clone()), None)),
            None => {
                debug!("no current session; creating one (user_id={})", user_id);
                self.create_session(None, Some(vec![user_id.clone()]))
            }
        };
        session.add_message(user_id, content, options)
    }

    /// LLM context for the current session, or empty when there is none.
    pub fn get_context_for_llm(&self, limit: usize) -> Vec<LlmMessage> {
        self.get_current_session()
            .map(|session| session.get_messages_for_llm(limit, false))
            .unwrap_or_default()
    }
}

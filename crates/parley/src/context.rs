//! Config-driven session creation and context rendering.

use log::debug;
use parley_config::{ContextConfig, ParleyConfig};
use parley_memory::{LlmMessage, Memory, Session};

/// Create a session seeded with the configured default participants.
///
/// Defaults come first, followed by `participants`; duplicates are dropped.
/// The new session becomes current.
pub fn create_configured_session<'a>(
    memory: &'a mut Memory,
    config: &ParleyConfig,
    session_id: Option<String>,
    participants: Vec<String>,
) -> &'a mut Session {
    let mut all = config.sessions.default_participants.clone();
    all.extend(participants);
    debug!(
        "creating configured session (defaults={}, total={})",
        config.sessions.default_participants.len(),
        all.len()
    );
    memory.create_session(session_id, Some(all))
}

/// Render a session's LLM context using the configured window.
pub fn context_for_llm(session: &Session, config: &ContextConfig) -> Vec<LlmMessage> {
    session.get_messages_for_llm(config.limit, config.include_user_labels)
}

/// Render the current session's LLM context, or nothing when there is none.
///
/// Unlike `Memory::get_context_for_llm`, this honors `include_user_labels`.
pub fn current_context(memory: &Memory, config: &ContextConfig) -> Vec<LlmMessage> {
    memory
        .get_current_session()
        .map(|session| context_for_llm(session, config))
        .unwrap_or_default()
}

use parley_memory::{Memory, MessageOptions, Metadata, Session};
use serde_json::Value;

/// System prompt seeded by [`chat_memory`].
pub const SYSTEM_PROMPT: &str = "sys-prompt";

/// Owned strings from string literals.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Memory holding a one-on-one "chat" session between james and the assistant,
/// seeded with a system prompt and one user message.
pub fn chat_memory() -> Memory {
    let mut memory = Memory::new();
    let session = memory.create_session(
        Some("chat".to_string()),
        Some(strings(&["james", "assistant"])),
    );
    session.add_message("system", SYSTEM_PROMPT, MessageOptions::new().role("system"));
    session.add_message("james", "hello", MessageOptions::new().role("user"));
    memory
}

/// Session where each participant says `"hi from <name>"` once, in order.
pub fn group_session(participants: &[&str]) -> Session {
    let mut session = Session::new(Some("group".to_string()), Some(strings(participants)));
    for participant in participants {
        session.add_message(
            *participant,
            format!("hi from {participant}"),
            MessageOptions::new(),
        );
    }
    session
}

/// Event payload built from key/value pairs.
pub fn event_data(pairs: &[(&str, Value)]) -> Metadata {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

//! Conversation memory for chat-style LLM applications.
//!
//! Sessions record timestamped episodes (chat messages and arbitrary events)
//! and project a bounded window of them into the `{role, content}` shape a
//! chat model expects. Everything lives in memory and is owned by the
//! embedding application.

pub mod error;
pub mod memory;
pub mod model;
pub mod session;

/// Memory error type.
pub use error::MemoryError;
/// Session registry.
pub use memory::{DEFAULT_CONTEXT_LIMIT, Memory};
/// Episode model and LLM message shape.
pub use model::{DEFAULT_ROLE, Episode, LlmMessage, MESSAGE_EVENT, MessageOptions, Metadata};
/// Sessions and episode filters.
pub use session::{EpisodeFilter, Session};

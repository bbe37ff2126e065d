//! Test helpers shared across Parley crates.

pub mod config;
pub mod memory;

pub use config::write_json5;
pub use memory::{SYSTEM_PROMPT, chat_memory, event_data, group_session, strings};

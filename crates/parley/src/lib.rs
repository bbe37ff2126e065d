//! Public SDK surface for Parley.
//!
//! This crate re-exports the memory and config building blocks and adds
//! helpers that apply a loaded `ParleyConfig` to sessions.

pub mod context;

/// Re-export for convenience.
pub use parley_config as config;
/// Re-export for convenience.
pub use parley_memory as memory;

pub use context::{context_for_llm, create_configured_session, current_context};
pub use parley_config::{ConfigError, ContextConfig, ParleyConfig};
pub use parley_memory::{
    Episode, EpisodeFilter, LlmMessage, Memory, MemoryError, MessageOptions, Metadata, Session,
};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

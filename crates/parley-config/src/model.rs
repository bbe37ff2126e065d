//! Configuration schema for Parley.

use serde::{Deserialize, Serialize};

/// Root config for the Parley SDK.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParleyConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

impl ParleyConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ParleyConfigBuilder {
        ParleyConfigBuilder::new()
    }
}

/// Builder for assembling a `ParleyConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ParleyConfigBuilder {
    config: ParleyConfig,
}

impl ParleyConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ParleyConfig::default(),
        }
    }

    /// Replace the LLM context window configuration.
    pub fn context(mut self, context: ContextConfig) -> Self {
        self.config.context = context;
        self
    }

    /// Replace the session defaults.
    pub fn sessions(mut self, sessions: SessionsConfig) -> Self {
        self.config.sessions = sessions;
        self
    }

    /// Finalize and return the built `ParleyConfig`.
    pub fn build(self) -> ParleyConfig {
        self.config
    }
}

/// How session history is projected into LLM context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextConfig {
    /// Number of most recent messages to render; 0 renders all of them.
    #[serde(default = "default_context_limit")]
    pub limit: usize,
    /// Prefix content with `[user_id] ` in sessions with more than two participants.
    #[serde(default)]
    pub include_user_labels: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            limit: default_context_limit(),
            include_user_labels: false,
        }
    }
}

/// Default number of context messages.
fn default_context_limit() -> usize {
    10
}

/// Defaults applied to newly created sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionsConfig {
    /// Participants added to every new session before caller-supplied ones.
    #[serde(default)]
    pub default_participants: Vec<String>,
}

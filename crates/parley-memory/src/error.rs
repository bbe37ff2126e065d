//! Error types for memory operations.

/// Errors returned by the session registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MemoryError {
    /// Session id is not present in the registry.
    #[error("session {0} does not exist")]
    InvalidReference(String),
}

//! # Runtime Errors
//!
//! Common error type for the session runtime. Entity-specific failures are
//! carried in [`SessionError::Entity`] so callers at the boundary can
//! downcast them back to the concrete error type.

/// Errors that can occur within the session runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session's mailbox is closed (the actor has stopped).
    #[error("Session closed")]
    Closed,
    /// The session dropped the response channel before replying; the command
    /// was never handled.
    #[error("Session dropped response channel")]
    Dropped,
    /// No live session exists for the key.
    #[error("No session: {0}")]
    NoSession(String),
    /// The entity rejected the command.
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

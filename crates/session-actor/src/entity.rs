//! # SessionEntity Trait
//!
//! The contract a session's state must satisfy to be managed by a
//! [`SessionActor`](crate::SessionActor). Associated types pin down the key,
//! command, reply, injected context, and error for one kind of session, so a
//! command for one entity type can never be delivered to another.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// What a session does after handling a command.
#[derive(Debug, Clone, Copy)]
pub enum Flow {
    /// Keep the session alive and wait for the next command.
    Continue,
    /// The session is finished; the actor stops and the registry forgets it.
    End,
}

/// Per-key session state managed by a [`SessionActor`](crate::SessionActor).
///
/// # Lifecycle
///
/// The runtime calls [`open`](SessionEntity::open) when the first command for
/// a key arrives, then feeds every subsequent command for that key to
/// [`handle`](SessionEntity::handle) in arrival order. Returning
/// [`Flow::End`] retires the session; the next command for the same key (if
/// the caller allows spawning) starts from `open` again.
///
/// # Errors
///
/// A `handle` error is reported to the caller as
/// [`SessionError::Entity`](crate::SessionError::Entity) and leaves the
/// session alive with its state untouched by the runtime - whatever the
/// entity mutated before failing is its own business.
#[async_trait]
pub trait SessionEntity: Clone + Send + 'static {
    /// The session key (e.g. a conversation id). Must be usable as a map key
    /// and printable for logging.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// One request to the session. `Clone` is required because the registry
    /// redelivers a command when it raced a session that ended between
    /// lookup and delivery.
    type Command: Clone + Send + Debug + 'static;

    /// What the session answers with.
    type Reply: Send + Debug + 'static;

    /// Dependencies injected when the actor starts (use `()` for none).
    type Context: Clone + Send + Sync + 'static;

    /// The entity's error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Constructs the initial state for a fresh session.
    fn open(id: Self::Id) -> Self;

    /// Handles one command, returning the reply and whether the session
    /// stays alive.
    async fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<(Self::Reply, Flow), Self::Error>;
}

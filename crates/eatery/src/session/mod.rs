//! # Order Session Manager
//!
//! One [`OrderSession`] per live conversation, managed by the session
//! runtime: the registry spawns a session on the first `add` for a
//! conversation id and forgets it when the order is committed or reset.
//! Because each session is its own actor, a double-submitted `add` cannot
//! lose an update, and a `complete` waiting on the store never stalls other
//! conversations.
//!
//! Per-session state machine: none → in progress (first add) → self-loops
//! on add/remove → none (successful complete, or reset). `remove` and
//! `complete` with no live session are guarded error paths, not transitions.

pub mod entity;
pub mod error;

pub use entity::{OrderCommand, OrderSession, SessionContext};
pub use error::OrderError;

use crate::store::OrderStore;
use session_actor::SessionRegistry;
use std::sync::Arc;

/// Creates the session registry through which all order mutations flow.
pub fn registry(store: Arc<dyn OrderStore>) -> SessionRegistry<OrderSession> {
    SessionRegistry::new(SessionContext { store }, 32)
}

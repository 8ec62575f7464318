//! # Session Messages
//!
//! The message types exchanged between a [`SessionClient`](crate::SessionClient)
//! and its [`SessionActor`](crate::SessionActor).

use crate::entity::SessionEntity;
use crate::error::SessionError;
use tokio::sync::oneshot;

/// One-shot response channel used by session actors.
pub type Response<T> = oneshot::Sender<Result<T, SessionError>>;

/// Request sent into a session's mailbox.
///
/// Unlike a CRUD resource, a session has a single mutation entry point: the
/// entity's own command type. `Snapshot` exists so operators and tests can
/// observe a session's current state without defining a read command.
#[derive(Debug)]
pub enum SessionRequest<T: SessionEntity> {
    Command {
        command: T::Command,
        respond_to: Response<T::Reply>,
    },
    Snapshot { respond_to: Response<T> },
}

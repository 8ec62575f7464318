//! # Session Actor
//!
//! The server half of a session: it owns the entity state for exactly one
//! key and processes that key's mailbox sequentially. Exclusive ownership of
//! the state within the task is what makes per-session mutations safe
//! without any locking.

use crate::client::SessionClient;
use crate::entity::{Flow, SessionEntity};
use crate::error::SessionError;
use crate::message::SessionRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor owning one session's state.
///
/// # Concurrency Model
///
/// There may be thousands of `SessionActor` instances alive at once - one
/// per active conversation - but each processes its own messages one at a
/// time. Two commands for the same session cannot interleave; commands for
/// different sessions run on independent tasks, so a session awaiting I/O
/// never stalls its neighbors.
///
/// # Lifecycle
///
/// The run loop ends when the entity returns [`Flow::End`] or when every
/// client handle has been dropped. Messages still queued when the loop ends
/// are dropped; their senders observe [`SessionError::Dropped`] and can
/// treat the session as gone. Because the actor only stops *between*
/// commands, a dropped reply always means the command was never applied.
pub struct SessionActor<T: SessionEntity> {
    id: T::Id,
    receiver: mpsc::Receiver<SessionRequest<T>>,
    state: T,
}

impl<T: SessionEntity> SessionActor<T> {
    /// Creates a new actor for `id` and its associated [`SessionClient`].
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(id: T::Id, buffer_size: usize) -> (Self, SessionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let state = T::open(id.clone());
        let actor = Self {
            id,
            receiver,
            state,
        };
        (actor, SessionClient::new(sender))
    }

    /// Runs the session's event loop until the entity ends it or the mailbox
    /// closes. `context` is injected into every [`SessionEntity::handle`]
    /// call.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g. "OrderSession" instead of
        // "eatery::session::entity::OrderSession")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, id = %self.id, "Session opened");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(entity_type, id = %self.id, ?command, "Command");
                    match self.state.handle(command, &context).await {
                        Ok((reply, flow)) => {
                            let _ = respond_to.send(Ok(reply));
                            if matches!(flow, Flow::End) {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(entity_type, id = %self.id, error = %e, "Command failed");
                            let _ = respond_to.send(Err(SessionError::Entity(Box::new(e))));
                        }
                    }
                }
                SessionRequest::Snapshot { respond_to } => {
                    debug!(entity_type, id = %self.id, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(entity_type, id = %self.id, "Session closed");
    }
}

//! # Session Client
//!
//! Type-safe handle for talking to one [`SessionActor`](crate::SessionActor).
//! Holds only a channel sender, so it is cheap to clone and share across
//! tasks.

use crate::entity::SessionEntity;
use crate::error::SessionError;
use crate::message::SessionRequest;
use tokio::sync::{mpsc, oneshot};

/// Handle to a single session's mailbox.
#[derive(Clone)]
pub struct SessionClient<T: SessionEntity> {
    sender: mpsc::Sender<SessionRequest<T>>,
}

impl<T: SessionEntity> SessionClient<T> {
    pub fn new(sender: mpsc::Sender<SessionRequest<T>>) -> Self {
        Self { sender }
    }

    /// Sends one command and waits for the session's reply.
    pub async fn command(&self, command: T::Command) -> Result<T::Reply, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Dropped)?
    }

    /// Returns a copy of the session's current state.
    pub async fn snapshot(&self) -> Result<T, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Snapshot { respond_to })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Dropped)?
    }

    /// True once the actor behind this handle has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

//! # Session Registry
//!
//! Maps session keys to running actors, spawning them on demand and
//! forgetting them when they end. This is the piece that turns the
//! one-actor-per-key model into an addressable collection: callers dispatch
//! by key and never hold actor handles themselves.

use crate::actor::SessionActor;
use crate::client::SessionClient;
use crate::entity::SessionEntity;
use crate::error::SessionError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// How often a dispatch re-resolves its target after racing a session that
/// ended between lookup and delivery.
const MAX_REDELIVER: usize = 3;

struct Slot<T: SessionEntity> {
    /// Spawn generation; guards cleanup so a finished actor can only remove
    /// its own map entry, never a successor spawned under the same key.
    epoch: u64,
    client: SessionClient<T>,
}

/// Keyed collection of live [`SessionActor`]s.
///
/// The map itself is guarded by a plain mutex held only for lookups and
/// inserts; all real work happens inside the per-key actors, so sessions
/// with different keys never contend beyond that brief critical section.
pub struct SessionRegistry<T: SessionEntity> {
    sessions: Arc<Mutex<HashMap<T::Id, Slot<T>>>>,
    context: T::Context,
    buffer_size: usize,
    next_epoch: AtomicU64,
}

impl<T: SessionEntity> SessionRegistry<T> {
    /// Creates an empty registry. `context` is cloned into every actor it
    /// spawns; `buffer_size` is each session's mailbox capacity.
    pub fn new(context: T::Context, buffer_size: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            context,
            buffer_size,
            next_epoch: AtomicU64::new(1),
        }
    }

    /// Sends `command` to the session for `id`, spawning the session first
    /// if none is live.
    ///
    /// When delivery races a session that just ended, the command is
    /// redelivered to a fresh session - safe because a session only stops
    /// between commands, so the lost delivery was never applied.
    pub async fn dispatch(&self, id: &T::Id, command: T::Command) -> Result<T::Reply, SessionError> {
        for _ in 0..MAX_REDELIVER {
            let client = self.live_or_spawn(id);
            match client.command(command.clone()).await {
                Err(SessionError::Closed) | Err(SessionError::Dropped) => continue,
                other => return other,
            }
        }
        Err(SessionError::Closed)
    }

    /// Sends `command` to the session for `id` only if one is live;
    /// [`SessionError::NoSession`] otherwise. A session that ends while the
    /// command is in flight counts as absent.
    pub async fn dispatch_existing(
        &self,
        id: &T::Id,
        command: T::Command,
    ) -> Result<T::Reply, SessionError> {
        let Some(client) = self.live(id) else {
            return Err(SessionError::NoSession(id.to_string()));
        };
        match client.command(command).await {
            Err(SessionError::Closed) | Err(SessionError::Dropped) => {
                Err(SessionError::NoSession(id.to_string()))
            }
            other => other,
        }
    }

    /// Copy of the current state for `id`, or `None` when no session is
    /// live.
    pub async fn snapshot(&self, id: &T::Id) -> Option<T> {
        let client = self.live(id)?;
        client.snapshot().await.ok()
    }

    /// True when a live session exists for `id`.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.live(id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        let sessions = self.sessions.lock().unwrap();
        sessions
            .values()
            .filter(|slot| !slot.client.is_closed())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self, id: &T::Id) -> Option<SessionClient<T>> {
        let sessions = self.sessions.lock().unwrap();
        let slot = sessions.get(id)?;
        if slot.client.is_closed() {
            return None;
        }
        Some(slot.client.clone())
    }

    fn live_or_spawn(&self, id: &T::Id) -> SessionClient<T> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(slot) = sessions.get(id) {
            if !slot.client.is_closed() {
                return slot.client.clone();
            }
        }

        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
        debug!(id = %id, epoch, "Spawning session");
        let (actor, client) = SessionActor::new(id.clone(), self.buffer_size);
        let context = self.context.clone();
        let sessions_ref: Weak<Mutex<HashMap<T::Id, Slot<T>>>> = Arc::downgrade(&self.sessions);
        let cleanup_id = id.clone();
        tokio::spawn(async move {
            actor.run(context).await;
            if let Some(sessions) = sessions_ref.upgrade() {
                let mut sessions = sessions.lock().unwrap();
                if sessions
                    .get(&cleanup_id)
                    .is_some_and(|slot| slot.epoch == epoch)
                {
                    sessions.remove(&cleanup_id);
                }
            }
        });

        sessions.insert(
            id.clone(),
            Slot {
                epoch,
                client: client.clone(),
            },
        );
        client
    }
}

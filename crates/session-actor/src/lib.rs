//! # Session Actor Runtime
//!
//! Building blocks for keyed, stateful conversation sessions on top of the
//! Actor Model. Each live session key gets its own actor: a Tokio task that
//! owns the session's state and processes its commands **sequentially**, so
//! rapid repeat submits for one key can never race each other, while
//! different keys run on different tasks and never block one another - even
//! when one of them is waiting on I/O.
//!
//! ## Architecture
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Entity layer** ([`SessionEntity`]) - your per-session state and
//!    business logic.
//! 2. **Runtime layer** ([`SessionActor`], [`SessionRegistry`]) - mailbox
//!    processing and session lifecycle.
//! 3. **Interface layer** ([`SessionClient`]) - type-safe communication.
//!
//! You write the business logic once in the entity trait; the runtime handles
//! message passing, spawn-on-first-use, and teardown when the entity signals
//! [`Flow::End`].
//!
//! ## Example
//!
//! ```rust
//! use session_actor::{Flow, SessionEntity, SessionRegistry};
//! use async_trait::async_trait;
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug)]
//! struct Counter {
//!     total: u32,
//! }
//!
//! #[async_trait]
//! impl SessionEntity for Counter {
//!     type Id = String;
//!     type Command = u32;
//!     type Reply = u32;
//!     type Context = ();
//!     type Error = Infallible;
//!
//!     fn open(_id: String) -> Self {
//!         Self { total: 0 }
//!     }
//!
//!     async fn handle(&mut self, amount: u32, _ctx: &()) -> Result<(u32, Flow), Infallible> {
//!         self.total += amount;
//!         Ok((self.total, Flow::Continue))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = SessionRegistry::<Counter>::new((), 8);
//!     let id = "session-1".to_string();
//!
//!     // First dispatch spawns the session, later ones reuse it.
//!     assert_eq!(registry.dispatch(&id, 2).await.unwrap(), 2);
//!     assert_eq!(registry.dispatch(&id, 3).await.unwrap(), 5);
//! }
//! ```
//!
//! ## Context Injection
//!
//! External collaborators (stores, other clients) are not baked into the
//! entity; they arrive as the `Context` associated type, cloned into each
//! actor when the registry spawns it. Entities stay constructible with
//! [`SessionEntity::open`] alone, which keeps them trivial to unit-test.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) that
//! implements the same request/response surface as a live [`SessionClient`]
//! but runs entirely in-memory against a queue of expectations.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod registry;
pub mod tracing;

// Re-export core types for convenience
pub use actor::SessionActor;
pub use client::SessionClient;
pub use entity::{Flow, SessionEntity};
pub use error::SessionError;
pub use message::{Response, SessionRequest};
pub use registry::SessionRegistry;

//! # Eatery Webhook
//!
//! Backend for a conversational food-ordering assistant. An external NLU
//! platform resolves user utterances into intents and parameters and calls
//! this backend, which keeps one in-progress order per conversation,
//! answers with natural-language status text, and commits finished orders
//! through a narrow store interface.
//!
//! ## Modules
//!
//! - [`model`] - pure data: the in-progress [`Order`](model::Order) and its
//!   formatter.
//! - [`session`] - the order session manager: one actor per conversation,
//!   driven by [`OrderCommand`](session::OrderCommand)s.
//! - [`store`] - the persistence seam ([`OrderStore`](store::OrderStore))
//!   and its in-memory reference implementation.
//! - [`webhook`] - the inbound boundary: envelope types, intent resolution,
//!   and the [`WebhookHandler`](webhook::WebhookHandler) dispatcher.
//!
//! The session runtime itself (actors, clients, registry) lives in the
//! `session-actor` crate.

pub mod model;
pub mod session;
pub mod store;
pub mod webhook;

//! Inbound boundary: the NLU platform's envelope, intent resolution, and the
//! dispatcher that turns resolved intents into textual replies.

pub mod handler;
pub mod intent;
pub mod request;

pub use handler::WebhookHandler;
pub use intent::{Intent, UnknownIntent};
pub use request::{extract_session_id, Parameters, WebhookRequest, WebhookResponse};

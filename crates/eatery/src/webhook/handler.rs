//! The dispatcher: turns one webhook call into one textual reply.

use crate::model::{Order, Quantity};
use crate::session::{self, OrderCommand, OrderError, OrderSession};
use crate::store::{OrderId, OrderStore, STATUS_DELIVERED};
use crate::webhook::intent::Intent;
use crate::webhook::request::{Parameters, WebhookRequest, WebhookResponse};
use session_actor::{SessionError, SessionRegistry};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Reset phrases recognized case-insensitively anywhere in the utterance.
/// Keyword-driven on purpose: "new order" style utterances arrive under a
/// generic intent whether or not the upstream classifier flagged a reset.
const RESET_PHRASES: [&str; 4] = ["new order", "reset order", "start over", "clear order"];

/// Reply when the platform sends something this webhook cannot serve.
const FALLBACK_REPLY: &str = "Sorry, I didn't get that. Can you say it again?";

/// Dispatches resolved intents onto the order sessions and the store.
///
/// The boundary contract is total: every call returns a reply string, and
/// no session, store, or runtime failure escapes as a fault to the
/// platform.
pub struct WebhookHandler {
    sessions: SessionRegistry<OrderSession>,
    store: Arc<dyn OrderStore>,
}

impl WebhookHandler {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            sessions: session::registry(store.clone()),
            store,
        }
    }

    /// Handles one webhook call end to end.
    #[instrument(
        skip(self, request),
        fields(intent = %request.query_result.intent.display_name)
    )]
    pub async fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        let session_id = request.session_id();
        let intent = match request.query_result.intent.display_name.parse::<Intent>() {
            Ok(intent) => intent,
            Err(e) => {
                warn!(session_id, error = %e, "unserved intent");
                return WebhookResponse::text(FALLBACK_REPLY);
            }
        };

        debug!(session_id, ?intent, "dispatching");
        let reply = match intent {
            Intent::NewOrder => {
                self.start_or_reset(&session_id, &request.query_result.query_text)
                    .await
            }
            Intent::AddItem => self.add(&session_id, &request.query_result.parameters).await,
            Intent::RemoveItem => {
                self.remove(&session_id, &request.query_result.parameters)
                    .await
            }
            Intent::CompleteOrder => self.complete(&session_id).await,
            Intent::TrackOrder => self.track(&request.query_result.parameters).await,
        };
        WebhookResponse::text(reply)
    }

    /// Current in-progress order for a session, if one is live. Lets the
    /// demo binary and tests observe session state.
    pub async fn order_snapshot(&self, session_id: &str) -> Option<Order> {
        let sid = session_id.to_string();
        self.sessions
            .snapshot(&sid)
            .await
            .map(|session| session.order().clone())
    }

    async fn start_or_reset(&self, session_id: &str, user_message: &str) -> String {
        let message = user_message.trim().to_lowercase();
        if RESET_PHRASES.iter().any(|phrase| message.contains(phrase)) {
            let sid = session_id.to_string();
            match self.sessions.dispatch_existing(&sid, OrderCommand::Reset).await {
                Ok(reply) => return reply,
                // Nothing to discard; fall through to the fresh-order prompt.
                Err(SessionError::NoSession(_)) => {}
                Err(e) => warn!(session_id, error = %e, "reset failed"),
            }
        }
        "Sure! Starting a fresh order. What would you like to have?".to_string()
    }

    async fn add(&self, session_id: &str, parameters: &Parameters) -> String {
        let items = &parameters.food_item;
        let quantities = parameters.quantities();
        if items.len() != quantities.len() {
            // Checked before dispatch so a malformed add never spawns a
            // session.
            return "Sorry I didn't understand. Can you please specify food items and quantities?"
                .to_string();
        }

        let delta: Vec<(String, Quantity)> = items.iter().cloned().zip(quantities).collect();
        let sid = session_id.to_string();
        match self
            .sessions
            .dispatch(&sid, OrderCommand::Add { items: delta })
            .await
        {
            Ok(reply) => reply,
            Err(e) => recover(Intent::AddItem, e),
        }
    }

    async fn remove(&self, session_id: &str, parameters: &Parameters) -> String {
        let sid = session_id.to_string();
        let command = OrderCommand::Remove {
            items: parameters.food_item.clone(),
            quantities: parameters.quantities(),
        };
        match self.sessions.dispatch_existing(&sid, command).await {
            Ok(reply) => reply,
            Err(e) => recover(Intent::RemoveItem, e),
        }
    }

    async fn complete(&self, session_id: &str) -> String {
        let sid = session_id.to_string();
        match self
            .sessions
            .dispatch_existing(&sid, OrderCommand::Complete)
            .await
        {
            Ok(reply) => reply,
            Err(e) => recover(Intent::CompleteOrder, e),
        }
    }

    async fn track(&self, parameters: &Parameters) -> String {
        let Some(order_id) = parameters.order_id.map(|id| id as OrderId) else {
            return FALLBACK_REPLY.to_string();
        };
        match self.store.order_status(order_id).await {
            Ok(Some(status)) if status == STATUS_DELIVERED => {
                format!("Your order is {status}. Thanks for your order!")
            }
            Ok(Some(status)) => format!(
                "The order status for order id: {order_id} is: {status}. Please wait a moment."
            ),
            Ok(None) => format!("No order found with order id: {order_id}"),
            Err(e) => {
                error!(order_id, error = %e, "status lookup failed");
                "Sorry, I couldn't fetch your order status due to a backend error. Please try again."
                    .to_string()
            }
        }
    }
}

/// Maps a session-runtime failure onto the fixed reply for the failed
/// intent.
fn recover(intent: Intent, failure: SessionError) -> String {
    let kind = match &failure {
        SessionError::NoSession(_) => OrderError::NoActiveOrder,
        SessionError::Entity(source) => source
            .downcast_ref::<OrderError>()
            .cloned()
            .unwrap_or(OrderError::PersistenceFailure),
        SessionError::Closed | SessionError::Dropped => {
            error!(?intent, error = %failure, "session runtime unavailable");
            OrderError::PersistenceFailure
        }
    };
    match kind {
        OrderError::NoActiveOrder if intent == Intent::RemoveItem => {
            "I'm having a trouble finding your order. Sorry! Can you place a new order please?"
                .to_string()
        }
        OrderError::NoActiveOrder => {
            "I'm having a trouble finding your order. Sorry! Can you place a new order?".to_string()
        }
        OrderError::QuantityMismatch => {
            "Sorry, quantities and items don't match for removal. Please try again.".to_string()
        }
        OrderError::PersistenceFailure => {
            "Sorry, I couldn't process your order due to a backend error. Please place a new order again"
                .to_string()
        }
    }
}

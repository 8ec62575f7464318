//! The order session entity: holds one conversation's in-progress order and
//! applies the add/remove/complete/reset rules to it.

use crate::model::{format_order, Deduction, Order, Quantity};
use crate::session::error::OrderError;
use crate::store::{save_order, OrderStore};
use async_trait::async_trait;
use session_actor::{Flow, SessionEntity};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Dependencies injected into every order session.
#[derive(Clone)]
pub struct SessionContext {
    pub store: Arc<dyn OrderStore>,
}

/// Mutations a conversation can request on its order.
#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Merge pre-zipped (item, quantity) pairs into the order. Callers zip
    /// and length-check before dispatch so a malformed add never spawns a
    /// session.
    Add { items: Vec<(String, Quantity)> },
    /// Take items off the order. Empty `quantities` means whole-item
    /// removal; otherwise the lists must line up pairwise.
    Remove {
        items: Vec<String>,
        quantities: Vec<Quantity>,
    },
    /// Commit the order to the store and end the session on success.
    Complete,
    /// Discard the order and end the session.
    Reset,
}

/// One conversation's in-progress order.
#[derive(Debug, Clone)]
pub struct OrderSession {
    id: String,
    order: Order,
}

impl OrderSession {
    /// The in-progress order. Exposed for state inspection; mutations only
    /// happen through [`OrderCommand`]s.
    pub fn order(&self) -> &Order {
        &self.order
    }

    fn add(&mut self, items: Vec<(String, Quantity)>) -> (String, Flow) {
        self.order.merge(items);
        let summary = format_order(&self.order);
        (
            format!("So far you have: {summary}. Do you need anything else?"),
            Flow::Continue,
        )
    }

    fn remove(
        &mut self,
        items: Vec<String>,
        quantities: Vec<Quantity>,
    ) -> Result<(String, Flow), OrderError> {
        let mut removed: Vec<String> = Vec::new();
        let mut missing: Vec<String> = Vec::new();

        if quantities.is_empty() {
            // No quantities given: remove each named item outright.
            for item in items {
                if self.order.remove_item(&item) {
                    removed.push(item);
                } else {
                    missing.push(item);
                }
            }
        } else {
            if items.len() != quantities.len() {
                return Err(OrderError::QuantityMismatch);
            }
            for (item, quantity) in items.into_iter().zip(quantities) {
                match self.order.deduct(&item, quantity) {
                    Some(Deduction::Reduced(taken)) => removed.push(format!("{taken} {item}")),
                    // The request met or exceeded stock; report what was
                    // actually held, not what was asked for.
                    Some(Deduction::Depleted(held)) => removed.push(format!("{held} {item}")),
                    None => missing.push(item),
                }
            }
        }

        let mut reply = String::new();
        if !removed.is_empty() {
            reply.push_str(&format!("Removed {} from your order.", removed.join(", ")));
        }
        if !missing.is_empty() {
            reply.push_str(&format!(
                " Your current order does not have {}.",
                missing.join(", ")
            ));
        }
        if self.order.is_empty() {
            reply.push_str(" Your order is empty!");
        } else {
            let summary = format_order(&self.order);
            reply.push_str(&format!(" Here is what is left in your order: {summary}"));
        }
        Ok((reply, Flow::Continue))
    }

    async fn complete(&mut self, ctx: &SessionContext) -> Result<(String, Flow), OrderError> {
        let order_id = save_order(ctx.store.as_ref(), &self.order)
            .await
            .map_err(|e| {
                warn!(session_id = %self.id, error = %e, "commit failed, keeping order");
                OrderError::PersistenceFailure
            })?;
        let total = ctx.store.total_order_price(order_id).await.map_err(|e| {
            error!(session_id = %self.id, order_id, error = %e, "total lookup failed after commit");
            OrderError::PersistenceFailure
        })?;
        info!(session_id = %self.id, order_id, total, "order committed");
        Ok((
            format!(
                "Awesome. We have placed your order. Here is your order id # {order_id}. \
                 Your order total is {total} which you can pay at the time of delivery!"
            ),
            Flow::End,
        ))
    }
}

#[async_trait]
impl SessionEntity for OrderSession {
    type Id = String;
    type Command = OrderCommand;
    type Reply = String;
    type Context = SessionContext;
    type Error = OrderError;

    fn open(id: String) -> Self {
        Self {
            id,
            order: Order::new(),
        }
    }

    async fn handle(
        &mut self,
        command: OrderCommand,
        ctx: &SessionContext,
    ) -> Result<(String, Flow), OrderError> {
        match command {
            OrderCommand::Add { items } => Ok(self.add(items)),
            OrderCommand::Remove { items, quantities } => self.remove(items, quantities),
            OrderCommand::Complete => self.complete(ctx).await,
            OrderCommand::Reset => {
                info!(session_id = %self.id, "order discarded");
                Ok((
                    "Okay, I've cleared your previous order. Please tell me what you'd like to order."
                        .to_string(),
                    Flow::End,
                ))
            }
        }
    }
}

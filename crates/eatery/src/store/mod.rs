//! Persistence seam for committed orders.
//!
//! The session manager never speaks SQL; it writes an order once at
//! completion and afterwards only reads tracking state, all through the
//! narrow [`OrderStore`] contract. [`MemoryStore`] is the reference
//! implementation used by the demo binary and the tests.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::model::Order;
use async_trait::async_trait;

/// Identifier assigned to an order at commit time.
pub type OrderId = i64;

/// Tracking status written for a freshly committed order.
pub const STATUS_IN_PROGRESS: &str = "in progress";
/// Tracking status that ends an order's lifecycle.
pub const STATUS_DELIVERED: &str = "delivered";

/// Narrow contract the session manager depends on for persistence.
///
/// Implementations own committed orders entirely. One order is stored as a
/// row per (item, quantity, order id) plus a tracking record; the tracking
/// record is what makes the order visible to status lookups.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Reserves the identifier the next committed order is stored under.
    async fn next_order_id(&self) -> Result<OrderId, StoreError>;

    /// Writes one item row for the given order.
    async fn insert_order_item(
        &self,
        item: &str,
        quantity: u32,
        order_id: OrderId,
    ) -> Result<(), StoreError>;

    /// Writes the tracking record for a committed order.
    async fn insert_order_tracking(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<(), StoreError>;

    /// Current tracking status, or `None` for an unknown order id.
    async fn order_status(&self, order_id: OrderId) -> Result<Option<String>, StoreError>;

    /// Total price of a committed order.
    async fn total_order_price(&self, order_id: OrderId) -> Result<f64, StoreError>;
}

/// Commits an in-progress order: reserves an id, writes one row per item,
/// then the tracking record.
///
/// Aborts on the first failing write. Item rows already written stay behind
/// without a tracking record, so the aborted order never becomes visible to
/// status lookups; callers keep the in-progress order so the user can retry
/// without re-entering items.
pub async fn save_order(store: &dyn OrderStore, order: &Order) -> Result<OrderId, StoreError> {
    let order_id = store.next_order_id().await?;
    for (item, quantity) in order.iter() {
        store.insert_order_item(item, quantity, order_id).await?;
    }
    store
        .insert_order_tracking(order_id, STATUS_IN_PROGRESS)
        .await?;
    Ok(order_id)
}

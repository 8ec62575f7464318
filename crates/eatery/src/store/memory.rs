//! In-memory order store.

use super::{OrderId, OrderStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`OrderStore`] backed by a fixed menu of priced items.
///
/// Stands in for the relational store in the demo binary and in tests.
/// `insert_order_item` rejects items that are not on the menu, which is the
/// store's natural validation failure and the easiest way to exercise the
/// commit-abort path.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    menu: HashMap<String, f64>,
    next_id: OrderId,
    items: Vec<ItemRow>,
    tracking: HashMap<OrderId, String>,
}

struct ItemRow {
    order_id: OrderId,
    item: String,
    quantity: u32,
}

impl MemoryStore {
    /// Creates a store selling the given menu of (item, unit price).
    pub fn with_menu<I, S>(menu: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            inner: Mutex::new(Inner {
                menu: menu
                    .into_iter()
                    .map(|(item, price)| (item.into(), price))
                    .collect(),
                next_id: 1,
                items: Vec::new(),
                tracking: HashMap::new(),
            }),
        }
    }

    /// Overwrites an order's tracking status. Delivery updates arrive from
    /// outside the webhook; tests and the demo use this to simulate them.
    pub fn set_status(&self, order_id: OrderId, status: &str) {
        self.inner
            .lock()
            .unwrap()
            .tracking
            .insert(order_id, status.to_string());
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn next_order_id(&self) -> Result<OrderId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        Ok(id)
    }

    async fn insert_order_item(
        &self,
        item: &str,
        quantity: u32,
        order_id: OrderId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.menu.contains_key(item) {
            return Err(StoreError::Invalid(format!("item not on the menu: {item}")));
        }
        inner.items.push(ItemRow {
            order_id,
            item: item.to_string(),
            quantity,
        });
        Ok(())
    }

    async fn insert_order_tracking(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .tracking
            .insert(order_id, status.to_string());
        Ok(())
    }

    async fn order_status(&self, order_id: OrderId) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().unwrap().tracking.get(&order_id).cloned())
    }

    async fn total_order_price(&self, order_id: OrderId) -> Result<f64, StoreError> {
        let inner = self.inner.lock().unwrap();
        let total = inner
            .items
            .iter()
            .filter(|row| row.order_id == order_id)
            .map(|row| {
                let unit = inner.menu.get(&row.item).copied().unwrap_or_default();
                unit * f64::from(row.quantity)
            })
            .sum();
        Ok(total)
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of units of one food item.
pub type Quantity = u32;

/// An in-progress order: food-item name to quantity, kept in the order the
/// items were first mentioned so replies read back the way the customer
/// spoke.
///
/// Item names are case-sensitive, exactly as the NLU platform resolved them.
///
/// Invariant: every entry holds a quantity > 0. A merge or deduction that
/// would leave zero (or less) removes the entry entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    items: IndexMap<String, Quantity>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current quantity held for an item, if present.
    pub fn quantity(&self, item: &str) -> Option<Quantity> {
        self.items.get(item).copied()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.items.iter().map(|(item, quantity)| (item.as_str(), *quantity))
    }

    /// Merges a batch of (item, quantity) pairs into the order.
    ///
    /// A pair **replaces** the current quantity outright rather than adding
    /// to it; the last pair wins when an item repeats within the batch. A
    /// zero quantity removes the item.
    pub fn merge<I>(&mut self, delta: I)
    where
        I: IntoIterator<Item = (String, Quantity)>,
    {
        for (item, quantity) in delta {
            if quantity == 0 {
                self.items.shift_remove(&item);
            } else {
                self.items.insert(item, quantity);
            }
        }
    }

    /// Removes an item regardless of its quantity. Returns `false` when the
    /// item was not in the order.
    pub fn remove_item(&mut self, item: &str) -> bool {
        self.items.shift_remove(item).is_some()
    }

    /// Deducts `quantity` units from an item, dropping the item when the
    /// request meets or exceeds what is held. `None` when the item is not in
    /// the order.
    pub fn deduct(&mut self, item: &str, quantity: Quantity) -> Option<Deduction> {
        let current = self.items.get_mut(item)?;
        if quantity < *current {
            *current -= quantity;
            Some(Deduction::Reduced(quantity))
        } else {
            let held = *current;
            self.items.shift_remove(item);
            Some(Deduction::Depleted(held))
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for Order {
    fn from_iter<I: IntoIterator<Item = (S, Quantity)>>(iter: I) -> Self {
        let mut order = Order::new();
        order.merge(iter.into_iter().map(|(item, quantity)| (item.into(), quantity)));
        order
    }
}

/// Outcome of deducting a quantity from one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deduction {
    /// The item stays in the order; this many units came off.
    Reduced(Quantity),
    /// The request met or exceeded the held quantity; the item is gone and
    /// this is what was actually removed.
    Depleted(Quantity),
}

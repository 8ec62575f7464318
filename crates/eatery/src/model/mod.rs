//! Pure domain data: the in-progress order and its formatter. Nothing in
//! here touches the runtime or the store.

pub mod format;
pub mod order;

pub use format::format_order;
pub use order::{Deduction, Order, Quantity};

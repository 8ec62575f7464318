//! Error type for the order store.

use thiserror::Error;

/// Errors surfaced by [`OrderStore`](crate::store::OrderStore) operations.
///
/// Replaces the upstream convention of signalling failure through a `-1`
/// sentinel return: callers can tell rejected data apart from a store that
/// is temporarily unreachable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store rejected the order data (e.g. an item it does not sell).
    #[error("invalid order data: {0}")]
    Invalid(String),

    /// The backing store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

//! Error types for order sessions.

use thiserror::Error;

/// Failure modes of order-session operations.
///
/// Every variant is recovered into a fixed reply at the webhook boundary;
/// nothing here ever reaches the NLU platform as a fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The conversation has no in-progress order to operate on.
    #[error("no active order for this session")]
    NoActiveOrder,

    /// Removal received quantities that do not line up with the items.
    #[error("items and quantities do not line up")]
    QuantityMismatch,

    /// The store rejected or failed the commit.
    #[error("order could not be persisted")]
    PersistenceFailure,
}

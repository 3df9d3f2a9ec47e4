use common::OrderId;
use domain::OrderStatus;
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No order is stored under the given ID.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// A conditional update found the order in a different status.
    #[error("Status mismatch for order {order_id}: expected {expected}, found {actual}")]
    StatusMismatch {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

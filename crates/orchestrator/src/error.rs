//! Orchestrator error types.

use std::time::Duration;

use common::{OrderId, PartId};
use domain::OrderStatus;
use gateway::GatewayError;
use order_store::StoreError;
use thiserror::Error;

/// Coarse classification of an [`OrderError`], used to pick a caller-facing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request itself is invalid; nothing was attempted.
    Validation,
    /// There is nothing to act on.
    NotFound,
    /// The action is not permitted in the order's current status.
    Conflict,
    /// A remote service failed or timed out; the caller may retry.
    Remote,
    /// Anything unexpected.
    Internal,
}

impl ErrorKind {
    /// Returns the kind as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Remote => "remote",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order was requested without any parts.
    #[error("Order must contain at least one part")]
    EmptyPartList,

    /// The catalog has none of the requested parts.
    #[error("No parts found")]
    PartsNotFound,

    /// A requested part is missing from the catalog or out of stock.
    #[error("Part not found: {0}")]
    PartNotFound(PartId),

    /// The resolved unit prices add up to more than an order total can hold.
    #[error("Total price of the requested parts is out of range")]
    TotalPriceOverflow,

    /// No order is stored under the given ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order is already paid.
    #[error("Order {0} is already paid")]
    OrderAlreadyPaid(OrderId),

    /// The order is cancelled.
    #[error("Order {0} is cancelled")]
    OrderCancelled(OrderId),

    /// A remote call did not complete within its time budget.
    #[error("{service} service did not respond within {after:?}")]
    Timeout {
        service: &'static str,
        after: Duration,
    },

    /// A remote service failed.
    #[error("Gateway error: {0}")]
    Gateway(GatewayError),

    /// The order store failed unexpectedly.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl OrderError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyPartList => ErrorKind::Validation,
            OrderError::PartsNotFound
            | OrderError::PartNotFound(_)
            | OrderError::OrderNotFound(_) => ErrorKind::NotFound,
            OrderError::OrderAlreadyPaid(_) | OrderError::OrderCancelled(_) => {
                ErrorKind::Conflict
            }
            OrderError::Timeout { .. } | OrderError::Gateway(_) => ErrorKind::Remote,
            OrderError::TotalPriceOverflow | OrderError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Maps a terminal status to the conflict it causes for pay or cancel.
    pub(crate) fn for_terminal_status(order_id: &OrderId, status: OrderStatus) -> Option<Self> {
        match status {
            OrderStatus::Paid => Some(OrderError::OrderAlreadyPaid(order_id.clone())),
            OrderStatus::Cancelled => Some(OrderError::OrderCancelled(order_id.clone())),
            OrderStatus::PendingPayment => None,
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(order_id) => OrderError::OrderNotFound(order_id),
            StoreError::StatusMismatch {
                order_id,
                expected,
                actual,
            } => match OrderError::for_terminal_status(&order_id, actual) {
                Some(conflict) => conflict,
                None => OrderError::Store(StoreError::StatusMismatch {
                    order_id,
                    expected,
                    actual,
                }),
            },
        }
    }
}

impl From<GatewayError> for OrderError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::PartsNotFound => OrderError::PartsNotFound,
            other => OrderError::Gateway(other),
        }
    }
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrderError>;

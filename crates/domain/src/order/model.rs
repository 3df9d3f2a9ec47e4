//! Order record and partial updates.

use common::{OrderId, PartId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

use super::{Money, OrderStatus, PaymentMethod};

/// A purchase order for a list of catalog parts.
///
/// The part list and total price are fixed at creation; payment and
/// cancellation only touch the payment fields and the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,

    /// User who placed the order.
    pub user_id: UserId,

    /// Requested parts in request order. Duplicates are kept.
    pub part_ids: Vec<PartId>,

    /// Sum of the unit prices resolved at creation.
    pub total_price: Money,

    /// Set once the order is paid.
    pub transaction_id: Option<TransactionId>,

    /// Set once the order is paid.
    pub payment_method: Option<PaymentMethod>,

    /// Current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new order awaiting payment.
    pub fn new(id: OrderId, user_id: UserId, part_ids: Vec<PartId>, total_price: Money) -> Self {
        Self {
            id,
            user_id,
            part_ids,
            total_price,
            transaction_id: None,
            payment_method: None,
            status: OrderStatus::PendingPayment,
        }
    }

    /// Applies the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &OrderUpdate) {
        if let Some(ref part_ids) = update.part_ids {
            self.part_ids = part_ids.clone();
        }
        if let Some(total_price) = update.total_price {
            self.total_price = total_price;
        }
        if let Some(ref transaction_id) = update.transaction_id {
            self.transaction_id = Some(transaction_id.clone());
        }
        if let Some(payment_method) = update.payment_method {
            self.payment_method = Some(payment_method);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// A partial update to a stored order. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub part_ids: Option<Vec<PartId>>,
    pub total_price: Option<Money>,
    pub transaction_id: Option<TransactionId>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<OrderStatus>,
}

impl OrderUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update recording a successful payment.
    pub fn paid(transaction_id: TransactionId, payment_method: PaymentMethod) -> Self {
        Self {
            transaction_id: Some(transaction_id),
            payment_method: Some(payment_method),
            status: Some(OrderStatus::Paid),
            ..Self::default()
        }
    }

    /// Update moving the order to `Cancelled`.
    pub fn cancelled() -> Self {
        Self::new().with_status(OrderStatus::Cancelled)
    }

    /// Sets the status field.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

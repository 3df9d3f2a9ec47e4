use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderStatus, OrderUpdate};

use crate::Result;

/// Core trait for order store implementations.
///
/// The store is the source of truth for order state. Callers always receive
/// copies; no reference into the store outlives a call.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Retrieves an order by ID.
    ///
    /// Fails with `NotFound` if no order is stored under `id`.
    async fn get(&self, id: &OrderId) -> Result<Order>;

    /// Stores a new order keyed by its ID.
    ///
    /// An existing order with the same ID is replaced.
    async fn create(&self, order: Order) -> Result<()>;

    /// Applies the fields present in `update` to an existing order.
    ///
    /// The update is applied atomically: readers observe either the old or the
    /// new record, never a mix. Returns the updated record.
    async fn update(&self, id: &OrderId, update: OrderUpdate) -> Result<Order>;

    /// Applies `update` only if the order is currently in `expected` status.
    ///
    /// The status check and the write happen under the same guard, so two
    /// concurrent callers cannot both observe `expected` and both write.
    /// Fails with `StatusMismatch` if the stored status differs.
    async fn update_if_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        update: OrderUpdate,
    ) -> Result<Order>;
}
